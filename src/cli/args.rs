//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::io::ReportFormat;

/// Compute site availability KPIs from site lists and trouble tickets
#[derive(Parser)]
#[command(name = "site-kpi")]
#[command(about = "site-kpi - Site availability and fault KPIs per province", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the KPIs and write the report
    #[command(name = "report")]
    Report {
        /// Run configuration file
        #[arg(short = 'c', long)]
        config: PathBuf,

        /// Ticket table, replacing ticket_source from the configuration
        #[arg(short = 't', long, value_name = "PATH")]
        tickets: Option<PathBuf>,

        /// Output directory for the report
        #[arg(short = 'o', long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Capacity window per site, in hours
        #[arg(long, value_name = "HOURS", conflicts_with = "capacity_days")]
        capacity_hours: Option<f64>,

        /// Capacity window per site, in days
        #[arg(long, value_name = "DAYS")]
        capacity_days: Option<f64>,

        /// Report output format, replacing report_format from the configuration
        #[arg(short = 'f', long, value_enum)]
        format: Option<ReportFormat>,
    },

    /// Validate the configuration and list which site sources exist
    #[command(name = "check")]
    Check {
        /// Run configuration file
        #[arg(short = 'c', long)]
        config: PathBuf,
    },
}

/// Collect the `report` flags that override configuration values.
pub fn report_overrides(
    tickets: Option<PathBuf>,
    output: Option<PathBuf>,
    capacity_hours: Option<f64>,
    capacity_days: Option<f64>,
    format: Option<ReportFormat>,
) -> ConfigOverrides {
    ConfigOverrides {
        capacity_hours,
        capacity_days,
        ticket_source: tickets,
        output_dir: output,
        report_format: format,
    }
}
