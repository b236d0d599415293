//! `report` command implementation
//!
//! Loads the configuration and ticket table, runs the KPI pipeline, writes
//! the report and prints the headline figures.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{load_config, ConfigOverrides};
use crate::io::{load_tickets, FileSiteSource};
use crate::kpi::{KpiPipeline, KpiReport};
use crate::report::build_report;

/// Run the report command
pub fn run_report_command(config_path: &Path, overrides: &ConfigOverrides) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let tickets = load_tickets(config.require_ticket_source()?)?;

    let pipeline = KpiPipeline::new(config.capacity, &config.regions, &FileSiteSource);
    let report = pipeline.run(&tickets)?;

    let book = build_report(&report);
    let written = config
        .report_format
        .writer(&config.output_dir)
        .write(&book)
        .with_context(|| format!("writing report to {}", config.output_dir.display()))?;
    info!("Wrote {} report files", written.len());

    print!("{}", render_summary(&report, &config.output_dir, &written));
    Ok(())
}

/// Text printed to stdout after a successful run.
pub fn render_summary(report: &KpiReport, output_dir: &Path, written: &[PathBuf]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Fault Rate: {:.2}% (ticketed sites / registered sites: {} / {})\n",
        report.fault_rate, report.ticketed_site_count, report.registered_site_count
    ));
    out.push_str(&format!(
        "Fault Clear Rate: {:.2}% of {} ticket rows\n",
        report.fault_clear_rate, report.ticket_count
    ));

    out.push_str("\nAvailability by province:\n");
    let width = report
        .province_summary
        .iter()
        .map(|p| p.province.chars().count())
        .max()
        .unwrap_or(0)
        .max("PROVINCE".len());
    out.push_str(&format!(
        "  {:<width$}  {:>6}  {:>12}  {:>10}\n",
        "PROVINCE",
        "SITES",
        "DOWNTIME_HR",
        "AVAIL (%)",
        width = width
    ));
    for province in &report.province_summary {
        out.push_str(&format!(
            "  {:<width$}  {:>6}  {:>12.2}  {:>10.4}\n",
            province.province,
            province.site_count,
            province.downtime_hours,
            province.availability_percent,
            width = width
        ));
    }

    out.push_str(&format!(
        "\nReport written to {} ({} files)\n",
        output_dir.display(),
        written.len()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::ProvinceSummary;

    #[test]
    fn test_render_summary() {
        let report = KpiReport {
            capacity_hours: 624.0,
            registered_site_count: 3,
            ticket_count: 3,
            ticketed_site_count: 2,
            fault_rate: 66.67,
            fault_clear_rate: 66.67,
            sites_by_province: vec![],
            province_summary: vec![ProvinceSummary {
                province: "Nan".to_string(),
                site_count: 2,
                downtime_hours: 724.0,
                total_capacity_hours: 1248.0,
                availability_percent: 41.9872,
            }],
        };

        let text = render_summary(&report, Path::new("out"), &[PathBuf::from("out/a.csv")]);

        assert!(text.contains("Fault Rate: 66.67% (ticketed sites / registered sites: 2 / 3)"));
        assert!(text.contains("Fault Clear Rate: 66.67%"));
        assert!(text.contains("41.9872"));
        assert!(text.contains("Report written to out (1 files)"));
    }
}
