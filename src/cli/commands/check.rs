//! `check` command implementation

use anyhow::Result;
use std::path::Path;

use crate::config::{load_config, ConfigOverrides, KpiConfig};
use crate::error::{ErrorCode, KpiError};

/// Source presence for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub province: String,
    pub present: bool,
}

pub fn region_status(config: &KpiConfig) -> Vec<SourceStatus> {
    config
        .regions
        .iter()
        .map(|region| SourceStatus {
            province: region.province.clone(),
            present: region.source.is_file(),
        })
        .collect()
}

/// Run the check command
///
/// Fails when no region source exists, since a report run would fail the
/// same way.
pub fn run_check_command(config_path: &Path) -> Result<()> {
    let config = load_config(config_path, &ConfigOverrides::default())?;

    println!("Configuration OK: {}", config_path.display());
    println!("  Capacity window: {} hours", config.capacity.hours());
    match &config.ticket_source {
        Some(path) if path.is_file() => println!("  Tickets: {} (present)", path.display()),
        Some(path) => println!("  Tickets: {} (missing)", path.display()),
        None => println!("  Tickets: not configured"),
    }
    println!(
        "  Output: {} ({})",
        config.output_dir.display(),
        config.report_format
    );

    let statuses = region_status(&config);
    println!("  Regions:");
    for (status, region) in statuses.iter().zip(&config.regions) {
        println!(
            "    [{}] {} -> {}",
            if status.present { "ok" } else { "missing" },
            status.province,
            region.source.display()
        );
    }

    let present = statuses.iter().filter(|s| s.present).count();
    println!("  {} of {} region sources present", present, statuses.len());

    if present == 0 {
        return Err(KpiError::data_with_code(
            ErrorCode::DATA_NO_SITE_SOURCES,
            "none of the configured site sources exist",
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::{CapacityWindow, RegionSource};
    use tempfile::TempDir;

    #[test]
    fn test_region_status() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("NAN.csv");
        std::fs::write(&present, "SITEID\n1\n").unwrap();

        let config = KpiConfig {
            capacity: CapacityWindow::from_hours(624.0).unwrap(),
            regions: vec![
                RegionSource::new("Nan", &present),
                RegionSource::new("Tak", temp.path().join("TAK.csv")),
            ],
            ticket_source: None,
            output_dir: temp.path().join("out"),
            report_format: crate::io::ReportFormat::default(),
        };

        let statuses = region_status(&config);
        assert!(statuses[0].present);
        assert!(!statuses[1].present);
        assert_eq!(statuses[1].province, "Tak");
    }
}
