use std::path::PathBuf;

use crate::domain::slot::DEFAULT_SLOT_KEY;

const DEFAULT_DATA_DIR: &str = ".todos";
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings read from `.env` and the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub slot_key: String,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let data_dir = PathBuf::from(get("TODOS_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
        let slot_key = get("TODOS_SLOT_KEY").unwrap_or_else(|| DEFAULT_SLOT_KEY.to_string());
        let log_dir = get("TODOS_LOG_DIR").map(PathBuf::from).unwrap_or_else(|| data_dir.join("logs"));
        let log_filter = get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self { data_dir, slot_key, log_dir, log_filter }
    }
}
