//! Error handling utilities

use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// For a `KpiError` the user message is always shown and the exit code comes
/// from its category. Anything else exits with 1.
///
/// # Verbose Mode Behavior
/// - `verbose = 0`: User-friendly messages only
/// - `verbose >= 1`: Includes full developer context with error chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::{describe_error_code, KpiError};

    error!("Fatal error: {}", error);

    let exit_code = if let Some(kpi_err) = error.downcast_ref::<KpiError>() {
        eprintln!("Error: {}", kpi_err.user_message());

        if verbose >= 1 {
            eprintln!(
                "\nE{:04}: {}",
                kpi_err.code(),
                describe_error_code(kpi_err.code())
            );
            eprintln!("\nContext Chain:\n{}", kpi_err.developer_message());
        }

        kpi_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}
