//! HTTP client for the fuel backend. One agent, one request per
//! operation, no retries.

mod types;

pub use types::{DailyTotal, FuelType, FuelTypeTotal, ReportRow, SaleRecord};

use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use ureq::Agent;

use crate::config::Config;
use crate::loader::ReportQuery;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with an `error` payload. The text is shown
    /// to the user exactly as received.
    #[error("{0}")]
    Backend(String),

    /// Non-2xx response without a readable error payload.
    #[error("Request failed with status {0}")]
    Status(u16),

    /// The request never completed (refused, unreachable, timed out).
    #[error("Failed to connect to the server")]
    Connect(#[source] ureq::Error),

    /// 2xx response whose body was not the expected JSON shape.
    #[error("Invalid response from server: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ApiError {
    /// User-facing message for a failed write: the backend's own text
    /// when present, otherwise the fallback tied to the operation.
    pub fn user_message(self, fallback: &str) -> String {
        match self {
            ApiError::Backend(msg) => msg,
            _ => fallback.to_string(),
        }
    }
}

pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        // Non-2xx responses are classified here, not turned into
        // transport errors, so backend error payloads stay readable.
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    /// GET /api/reports
    pub fn reports(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, ApiError> {
        self.get_rows("/api/reports", query)
    }

    /// GET /api/sales_by_type
    pub fn sales_by_type(&self, query: &ReportQuery) -> Result<Vec<FuelTypeTotal>, ApiError> {
        self.get_rows("/api/sales_by_type", query)
    }

    /// GET /api/sales_over_time
    pub fn sales_over_time(&self, query: &ReportQuery) -> Result<Vec<DailyTotal>, ApiError> {
        self.get_rows("/api/sales_over_time", query)
    }

    /// POST /api/sales
    pub fn log_sale(&self, sale: &SaleRecord) -> Result<(), ApiError> {
        self.post("/api/sales", &serde_json::to_value(sale)?)
    }

    /// POST /api/customers
    pub fn add_customer(&self, name: &str) -> Result<(), ApiError> {
        self.post("/api/customers", &json!({ "name": name }))
    }

    /// POST /api/reward
    pub fn reward_points(&self, name: &str, points: u32) -> Result<(), ApiError> {
        self.post("/api/reward", &json!({ "name": name, "points": points }))
    }

    fn get_rows<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ReportQuery,
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}{}?{}", self.base_url, path, query.query_string());

        let mut response = self.agent.get(&url).call().map_err(ApiError::Connect)?;
        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(ApiError::Connect)?;

        classify_rows(status.as_u16(), status.is_success(), &body)
    }

    fn post(&self, path: &str, payload: &serde_json::Value) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let body = payload.to_string();

        let mut response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(ApiError::Connect)?;
        let status = response.status();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(ApiError::Connect)?;

        classify_write(status.as_u16(), status.is_success(), &text)
    }
}

/// Classify a collection response. An `error` payload wins regardless of
/// status; otherwise non-2xx maps to the status code and 2xx parses as
/// rows.
fn classify_rows<T: DeserializeOwned>(
    status: u16,
    success: bool,
    body: &str,
) -> Result<Vec<T>, ApiError> {
    if let Some(message) = backend_error(body) {
        return Err(ApiError::Backend(message));
    }
    if !success {
        return Err(ApiError::Status(status));
    }
    Ok(serde_json::from_str(body)?)
}

/// Classify a write response. Writes only report failure on non-2xx; a
/// successful status is success no matter the body.
fn classify_write(status: u16, success: bool, body: &str) -> Result<(), ApiError> {
    if success {
        return Ok(());
    }
    if let Some(message) = backend_error(body) {
        return Err(ApiError::Backend(message));
    }
    Err(ApiError::Status(status))
}

fn backend_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
