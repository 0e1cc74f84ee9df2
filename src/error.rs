use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Please enter customer name")]
    MissingCustomerName,

    #[error("Please provide both customer name and points.")]
    MissingRewardFields,

    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    #[error("Price must be greater than zero")]
    InvalidPrice,

    /// An operation against the backend failed. Carries the user-facing
    /// message only: the backend's own text when it sent one, otherwise
    /// the fallback tied to the operation.
    #[error("{0}")]
    Operation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
