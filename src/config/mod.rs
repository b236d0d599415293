//! Run configuration
//!
//! A run is described by a TOML file naming the capacity window, the ticket
//! table, the output directory, the report format and the region site lists.
//! Values are merged in order: file, then `SITE_KPI_*` environment variables,
//! then command-line overrides. [`ConfigFile::into_config`] validates the
//! merged result.
//!
//! Relative paths written in the file resolve against the file's directory.
//! Relative paths from the environment or the command line resolve against
//! the working directory.

pub mod loader;

pub use loader::{load_config, parse_config_str};

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ErrorCode, KpiError, Result};
use crate::io::ReportFormat;
use crate::kpi::{CapacityWindow, RegionSource};

pub const ENV_CAPACITY_HOURS: &str = "SITE_KPI_CAPACITY_HOURS";
pub const ENV_OUTPUT_DIR: &str = "SITE_KPI_OUTPUT_DIR";
pub const ENV_LOG_LEVEL: &str = "SITE_KPI_LOG_LEVEL";

pub const DEFAULT_OUTPUT_DIR: &str = "KPI_Site_Availability_Report";

const HOURS_PER_DAY: f64 = 24.0;

/// Region entry as written in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionEntry {
    pub province: String,
    pub source: PathBuf,
}

/// Raw configuration file contents, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub capacity_hours_per_site: Option<f64>,
    pub capacity_days: Option<f64>,
    pub ticket_source: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub report_format: Option<ReportFormat>,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

/// Values supplied on the command line. Each set field replaces the merged
/// file/environment value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub capacity_hours: Option<f64>,
    pub capacity_days: Option<f64>,
    pub ticket_source: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub report_format: Option<ReportFormat>,
}

/// Validated configuration for one reporting run.
#[derive(Debug, Clone)]
pub struct KpiConfig {
    pub capacity: CapacityWindow,
    pub regions: Vec<RegionSource>,
    pub ticket_source: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub report_format: ReportFormat,
}

impl KpiConfig {
    /// The ticket table path, which must come from the file or the command line.
    pub fn require_ticket_source(&self) -> Result<&Path> {
        self.ticket_source.as_deref().ok_or_else(|| {
            KpiError::config_with_code(
                ErrorCode::CONFIG_MISSING_REQUIRED,
                "no ticket source configured (set ticket_source or pass --tickets)",
                None,
            )
        })
    }
}

fn invalid_value(message: impl Into<String>) -> KpiError {
    KpiError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, message, None)
}

impl ConfigFile {
    /// Resolve relative paths against the directory holding the file.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        };

        if let Some(path) = self.ticket_source.as_mut() {
            resolve(path);
        }
        match self.output_dir.as_mut() {
            Some(path) => resolve(path),
            None => self.output_dir = Some(base_dir.join(DEFAULT_OUTPUT_DIR)),
        }
        for region in &mut self.regions {
            resolve(&mut region.source);
        }
    }

    /// Merge `SITE_KPI_*` variables from the process environment.
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge environment overrides read through `lookup`.
    ///
    /// Call after [`ConfigFile::resolve_paths`]: a relative
    /// `SITE_KPI_OUTPUT_DIR` is kept as given and so resolves against the
    /// working directory, not the configuration file's directory.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_CAPACITY_HOURS) {
            let hours = raw.trim().parse::<f64>().map_err(|e| {
                invalid_value(format!("{} is not a number: '{}'", ENV_CAPACITY_HOURS, raw))
                    .with_source(e)
            })?;
            self.capacity_hours_per_site = Some(hours);
            self.capacity_days = None;
        }

        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|dir| !dir.trim().is_empty()) {
            self.output_dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(hours) = overrides.capacity_hours {
            self.capacity_hours_per_site = Some(hours);
            self.capacity_days = None;
        }
        if let Some(days) = overrides.capacity_days {
            self.capacity_days = Some(days);
            self.capacity_hours_per_site = None;
        }
        if let Some(path) = &overrides.ticket_source {
            self.ticket_source = Some(path.clone());
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = Some(dir.clone());
        }
        if let Some(format) = overrides.report_format {
            self.report_format = Some(format);
        }
    }

    fn capacity(&self) -> Result<CapacityWindow> {
        let window = match (self.capacity_hours_per_site, self.capacity_days) {
            (Some(hours), Some(days)) => {
                if (hours - days * HOURS_PER_DAY).abs() > f64::EPSILON * hours.abs().max(1.0) {
                    return Err(invalid_value(format!(
                        "capacity_hours_per_site ({}) and capacity_days ({}) disagree",
                        hours, days
                    )));
                }
                CapacityWindow::from_hours(hours)
            }
            (Some(hours), None) => CapacityWindow::from_hours(hours),
            (None, Some(days)) => CapacityWindow::from_days(days),
            (None, None) => {
                return Err(KpiError::config_with_code(
                    ErrorCode::CONFIG_MISSING_REQUIRED,
                    "one of capacity_hours_per_site or capacity_days is required",
                    None,
                ))
            }
        };
        window.map_err(|e| invalid_value("invalid capacity window").with_source(e))
    }

    fn regions(&self) -> Result<Vec<RegionSource>> {
        if self.regions.is_empty() {
            return Err(KpiError::config_with_code(
                ErrorCode::CONFIG_MISSING_REQUIRED,
                "at least one [[regions]] entry is required",
                None,
            ));
        }

        let mut seen = HashSet::new();
        let mut regions = Vec::with_capacity(self.regions.len());
        for entry in &self.regions {
            let province = entry.province.trim();
            if province.is_empty() {
                return Err(invalid_value(format!(
                    "region with source {} has a blank province",
                    entry.source.display()
                )));
            }
            if !seen.insert(province.to_string()) {
                return Err(KpiError::config_with_code(
                    ErrorCode::CONFIG_DUPLICATE_REGION,
                    format!("region '{}' is declared more than once", province),
                    None,
                ));
            }
            regions.push(RegionSource::new(province, entry.source.clone()));
        }
        Ok(regions)
    }

    /// Validate the merged values.
    pub fn into_config(self) -> Result<KpiConfig> {
        let capacity = self.capacity()?;
        let regions = self.regions()?;
        Ok(KpiConfig {
            capacity,
            regions,
            ticket_source: self.ticket_source,
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            report_format: self.report_format.unwrap_or_default(),
        })
    }
}
