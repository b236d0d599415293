use serde::Serialize;

use crate::error::{ErrorCode, KpiError, Result};

const HOURS_PER_DAY: f64 = 24.0;

/// Length of the reporting period every site is measured against.
///
/// Availability is undefined for an empty window, so the only way to build
/// one is through the validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CapacityWindow {
    hours: f64,
}

impl CapacityWindow {
    pub fn from_hours(hours: f64) -> Result<Self> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(KpiError::computation_with_code(
                ErrorCode::COMPUTE_INVALID_CAPACITY,
                format!("capacity window must be a positive number of hours, got {}", hours),
            ));
        }
        Ok(Self { hours })
    }

    /// Build a window covering `days` full days.
    pub fn from_days(days: f64) -> Result<Self> {
        Self::from_hours(days * HOURS_PER_DAY)
            .map_err(|e| e.with_context(format!("from {} days", days)))
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }
}
