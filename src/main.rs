use clap::Parser;
use site_kpi::app::{handle_fatal_error, init_logging, AppConfig};
use site_kpi::cli::{execute_command, Cli};

fn main() {
    let cli = Cli::parse();

    let config = AppConfig::new(cli.verbose);
    init_logging(&config);

    if let Err(e) = execute_command(cli.command) {
        handle_fatal_error(e, cli.verbose);
    }
}
