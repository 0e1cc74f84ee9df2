pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod reward;

pub use api::{ApiClient, ApiError, DailyTotal, FuelType, FuelTypeTotal, ReportRow, SaleRecord};
pub use config::Config;
pub use error::{DashError, Result};
pub use loader::{LoadState, Loader, QueryError, ReportFilter, ReportQuery};
pub use reward::{RewardFlow, RewardState};
