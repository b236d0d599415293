//! Application configuration
//!
//! Process-wide settings that apply before a run configuration is loaded.

use crate::config::ENV_LOG_LEVEL;

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Filter directive taken from `SITE_KPI_LOG_LEVEL`
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            log_filter: std::env::var(ENV_LOG_LEVEL)
                .ok()
                .filter(|level| !level.trim().is_empty()),
        }
    }

    /// Get the log filter, preferring an explicit environment setting over
    /// the verbosity flag
    pub fn log_level(&self) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}
