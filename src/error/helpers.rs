use super::{ErrorCode, KpiError};
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    fn to_source_error(self, message: impl Into<String>) -> Result<T, KpiError>;
    fn to_report_error(self, message: impl Into<String>) -> Result<T, KpiError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_source_error(self, message: impl Into<String>) -> Result<T, KpiError> {
        self.map_err(|e| KpiError::source_error(message).with_source(e))
    }

    fn to_report_error(self, message: impl Into<String>) -> Result<T, KpiError> {
        self.map_err(|e| KpiError::report(message).with_source(e))
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;

    pub fn config_not_found(path: impl AsRef<Path>) -> KpiError {
        KpiError::config_with_code(
            ErrorCode::CONFIG_NOT_FOUND,
            "configuration file not found",
            Some(path.as_ref().to_path_buf()),
        )
    }

    pub fn missing_column(path: impl AsRef<Path>, columns: &[&str]) -> KpiError {
        KpiError::source_with_code(
            ErrorCode::SOURCE_MISSING_COLUMN,
            format!("missing required column(s): {}", columns.join(", ")),
            Some(path.as_ref().to_path_buf()),
        )
    }

    pub fn source_io_error(path: impl AsRef<Path>, operation: &str) -> KpiError {
        KpiError::source_with_code(
            ErrorCode::SOURCE_IO_ERROR,
            format!("{} failed", operation),
            Some(path.as_ref().to_path_buf()),
        )
    }

    pub fn report_io_error(path: impl AsRef<Path>, operation: &str) -> KpiError {
        KpiError::report_with_code(
            ErrorCode::REPORT_IO_ERROR,
            format!("{} failed", operation),
            Some(path.as_ref().to_path_buf()),
        )
    }

    pub fn division_by_zero(what: &str) -> KpiError {
        KpiError::computation_with_code(
            ErrorCode::COMPUTE_DIVISION_BY_ZERO,
            format!("{} has a zero denominator", what),
        )
    }
}
