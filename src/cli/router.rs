//! Command routing and execution

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::args::{report_overrides, Cli, Commands};
use crate::cli::commands::{run_check_command, run_report_command};

/// Execute a CLI command based on the parsed arguments
pub fn execute_command(command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Report {
            config,
            tickets,
            output,
            capacity_hours,
            capacity_days,
            format,
        }) => run_report_command(
            &config,
            &report_overrides(tickets, output, capacity_hours, capacity_days, format),
        ),
        Some(Commands::Check { config }) => run_check_command(&config),
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
