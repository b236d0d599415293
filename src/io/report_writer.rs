use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::xlsx_writer::XlsxReportWriter;
use crate::error::{common, ErrorCode, ErrorExt, KpiError, Result};
use crate::report::{ReportBook, ReportSection, SectionRows};

pub const SUMMARY_FILE: &str = "kpi_summary.json";

pub(crate) const SITE_HEADERS: [&str; 4] =
    ["PROVINCE", "SITE_7DIGITS", "DOWNTIME_HR", "Availability (%)"];
pub(crate) const SUMMARY_HEADERS: [&str; 5] = [
    "PROVINCE",
    "Site Count",
    "DOWNTIME_HR",
    "Total Time (hr)",
    "Availability (%)",
];

/// Persists a laid-out report.
pub trait ReportWriter {
    /// Write every section and the summary, returning the files created.
    fn write(&self, book: &ReportBook) -> Result<Vec<PathBuf>>;
}

/// How report sections are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One workbook with a sheet per section
    #[default]
    Xlsx,
    /// One CSV file per section
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xlsx => write!(f, "xlsx"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl ReportFormat {
    pub fn writer(self, output_dir: impl Into<PathBuf>) -> Box<dyn ReportWriter> {
        match self {
            Self::Xlsx => Box::new(XlsxReportWriter::new(output_dir)),
            Self::Csv => Box::new(CsvReportWriter::new(output_dir)),
        }
    }
}

pub(crate) fn create_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|e| {
        common::report_io_error(output_dir, "creating output directory").with_source(e)
    })
}

/// Write the headline figures as pretty JSON into `output_dir`.
pub(crate) fn write_summary_json(output_dir: &Path, book: &ReportBook) -> Result<PathBuf> {
    let path = output_dir.join(SUMMARY_FILE);
    let file = File::create(&path)
        .map_err(|e| common::report_io_error(&path, "creating summary file").with_source(e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &book.summary)
        .to_report_error("failed to serialize KPI summary")
        .map_err(|e| e.with_path(&path))?;
    Ok(path)
}

/// Writes each section as `NN_<label>.csv` plus a JSON summary into one
/// directory.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    output_dir: PathBuf,
}

impl CsvReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// File name for the section at `position`; the prefix keeps the
    /// directory listing in report order.
    pub fn section_file_name(position: usize, label: &str) -> String {
        format!("{:02}_{}.csv", position + 1, sanitize_file_stem(label))
    }

    fn write_section(&self, position: usize, section: &ReportSection) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(Self::section_file_name(position, &section.label));

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|e| common::report_io_error(&path, "creating section file").with_source(e))?;

        match &section.rows {
            SectionRows::Sites(rows) => {
                writer.write_record(SITE_HEADERS).map_err(|e| section_error(&path, e))?;
                for row in rows {
                    writer.serialize(row).map_err(|e| section_error(&path, e))?;
                }
            }
            SectionRows::Provinces(rows) => {
                writer.write_record(SUMMARY_HEADERS).map_err(|e| section_error(&path, e))?;
                for row in rows {
                    writer.serialize(row).map_err(|e| section_error(&path, e))?;
                }
            }
        }
        writer.flush().map_err(|e| section_error(&path, e))?;

        debug!(
            "Wrote section {} ({} rows) to {}",
            section.label,
            section.rows.len(),
            path.display()
        );
        Ok(path)
    }
}

fn section_error(path: &Path, err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> KpiError {
    KpiError::report_with_code(
        ErrorCode::REPORT_SERIALIZATION_ERROR,
        "failed to write section",
        Some(path.to_path_buf()),
    )
    .with_source(err)
}

/// Replace characters that cannot appear in file names on common platforms.
pub fn sanitize_file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

impl ReportWriter for CsvReportWriter {
    fn write(&self, book: &ReportBook) -> Result<Vec<PathBuf>> {
        create_output_dir(&self.output_dir)?;

        let mut written = Vec::with_capacity(book.sections.len() + 1);
        for (position, section) in book.sections.iter().enumerate() {
            written.push(self.write_section(position, section)?);
        }
        written.push(write_summary_json(&self.output_dir, book)?);

        info!(
            "Report written to {} ({} sections)",
            self.output_dir.display(),
            book.sections.len()
        );
        Ok(written)
    }
}
