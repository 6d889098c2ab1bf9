//! Application configuration. Input path, log filter, batch policy.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Log filter used when neither RUST_LOG nor ACADEMIC_RECORDS_LOG_FILTER is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Command file to read. Stdin when unset. Read from ACADEMIC_RECORDS_INPUT_PATH.
    #[serde(default)]
    pub input_path: Option<String>,

    /// tracing filter directive. Read from ACADEMIC_RECORDS_LOG_FILTER.
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Stop at the first failed command. Read from ACADEMIC_RECORDS_STOP_ON_ERROR.
    #[serde(default)]
    pub stop_on_error: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("ACADEMIC_RECORDS").try_parsing(true));
        if let Ok(path) = std::env::var("ACADEMIC_RECORDS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Input path, if any. A blank value means stdin.
    pub fn input_path(&self) -> Option<PathBuf> {
        self.input_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// Returns the log filter. Defaults to DEFAULT_LOG_FILTER.
    pub fn log_filter_or_default(&self) -> String {
        self.log_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }

    pub fn stop_on_error_or_default(&self) -> bool {
        self.stop_on_error.unwrap_or(false)
    }

    /// Command-line path wins over the configured one.
    pub fn with_input_override(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.input_path = Some(path.display().to_string());
        }
        self
    }
}
