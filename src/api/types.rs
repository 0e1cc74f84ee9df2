use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fuel products the station sells. The wire form is the capitalized
/// name the backend stores ("Petrol", "Diesel", "Kerosine").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum FuelType {
    Petrol,
    Diesel,
    Kerosine,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Kerosine => "Kerosine",
        };
        f.write_str(name)
    }
}

/// One sale as submitted to the backend. Sent once, never kept locally.
#[derive(Debug, Serialize)]
pub struct SaleRecord {
    pub fuel_type: FuelType,
    pub quantity: f64,
    pub price: f64,
    pub date: NaiveDate,
}

/// Aggregated quantity and revenue for one fuel type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportRow {
    pub fuel_type: String,
    pub total_quantity: f64,
    pub total_revenue: f64,
}

/// Quantity sold per fuel type, as charted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FuelTypeTotal {
    pub fuel_type: String,
    pub total_quantity: f64,
}

/// Sales total for one day. The date stays a string: it is only ever a
/// chart label and the backend already formats it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyTotal {
    pub date: String,
    pub total_sales: f64,
}
