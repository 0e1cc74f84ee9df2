mod settings;

pub use settings::{ApiSettings, Config, DisplaySettings, DEFAULT_BASE_URL};

use crate::error::{DashError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.fueldash or XDG config)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "fueldash") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.fueldash/
    let home = dirs_home().ok_or_else(|| {
        DashError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".fueldash"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Path of the config file inside a config directory.
pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("config.toml")
}

/// Load config.toml. A missing file is not an error: the dashboard then
/// talks to the built-in local default backend.
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_file(config_dir);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DashError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
# Base URL of the fuel backend this dashboard talks to.
base_url = "http://127.0.0.1:5000"
# Per-request timeout in seconds.
timeout_secs = 10

[display]
# Symbol used when printing revenue and prices.
currency_symbol = "₦"
"#;
