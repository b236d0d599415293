//! File-backed inputs and outputs
//!
//! Loaders for the region site lists and the ticket table (CSV exports or
//! spreadsheet workbooks, by extension), and the writers that persist a
//! laid-out report.

pub mod report_writer;
pub mod sites;
pub mod table;
pub mod tickets;
pub mod xlsx_writer;

pub use report_writer::{CsvReportWriter, ReportFormat, ReportWriter, SUMMARY_FILE};
pub use sites::{read_site_rows, FileSiteSource};
pub use table::{open_table, SourceFormat, Table};
pub use tickets::{load_tickets, read_tickets};
pub use xlsx_writer::{XlsxReportWriter, WORKBOOK_FILE};
