//! Command implementation modules

pub mod check;
pub mod report;

pub use check::run_check_command;
pub use report::run_report_command;
