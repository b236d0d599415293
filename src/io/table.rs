//! Tabular input shared by the site and ticket loaders.
//!
//! Sources are read either as CSV or as the first worksheet of a
//! spreadsheet workbook, chosen by file extension. Both end up as a
//! [`Table`] of trimmed text cells.

use calamine::{open_workbook_auto, Data, Reader};
use csv::StringRecord;
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::{common, ErrorCode, ErrorExt, KpiError, Result};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// On-disk layout of a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    /// Spreadsheet extensions select [`SourceFormat::Workbook`]; anything
    /// else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_workbook {
            Self::Workbook
        } else {
            Self::Csv
        }
    }
}

/// A header row plus data rows. Data rows may be shorter than the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// Position of the first header matching one of `names`, in order of
    /// preference.
    pub fn column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.headers.iter().position(|header| header == *name))
    }

    /// Names from `required` that are absent from the header row.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.column(&[name]).is_none())
            .collect()
    }
}

fn clean_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

fn malformed_row(origin: &Path, row_number: usize) -> KpiError {
    KpiError::source_with_code(
        ErrorCode::SOURCE_MALFORMED_ROW,
        format!("malformed row {}", row_number),
        Some(origin.to_path_buf()),
    )
}

/// Read CSV content into a table. Short and long rows are accepted.
pub fn read_csv_table<R: Read>(reader: R, origin: &Path) -> Result<Table> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = csv
        .headers()
        .to_source_error("failed to read header row")
        .map_err(|e| e.with_path(origin))?
        .iter()
        .map(clean_header)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in csv.records().enumerate() {
        rows.push(record.map_err(|e| malformed_row(origin, index + 2).with_source(e))?);
    }

    Ok(Table { headers, rows })
}

/// Text of one spreadsheet cell. Whole numbers print without a fraction,
/// so a numeric site id cell reads the same as its CSV export.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        other => other.to_string().trim().to_string(),
    }
}

/// Read the first worksheet of a workbook into a table. The first row of
/// the used range is the header.
pub fn read_workbook_table(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        common::source_io_error(path, "opening workbook").with_context(e)
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            KpiError::source_with_code(
                ErrorCode::SOURCE_MALFORMED_ROW,
                "workbook has no worksheets",
                Some(path.to_path_buf()),
            )
        })?
        .map_err(|e| common::source_io_error(path, "reading first worksheet").with_context(e))?;

    let mut cells = range.rows();
    let headers: StringRecord = match cells.next() {
        Some(row) => row.iter().map(|cell| clean_header(&cell_text(cell)).to_string()).collect(),
        None => StringRecord::new(),
    };
    let rows = cells
        .map(|row| row.iter().map(cell_text).collect::<StringRecord>())
        .collect();

    Ok(Table { headers, rows })
}

/// Open a tabular source in the format its extension names. A missing file
/// yields `None`; callers decide whether that is fatal.
pub fn open_table(path: &Path) -> Result<Option<Table>> {
    match SourceFormat::from_path(path) {
        SourceFormat::Csv => match File::open(path) {
            Ok(file) => read_csv_table(file, path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(common::source_io_error(path, "opening file").with_source(e)),
        },
        SourceFormat::Workbook => match fs::metadata(path) {
            Ok(_) => read_workbook_table(path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(common::source_io_error(path, "opening workbook").with_source(e)),
        },
    }
}
