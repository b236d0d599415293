//! Spreadsheet report output.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::report_writer::{
    create_output_dir, write_summary_json, ReportWriter, SITE_HEADERS, SUMMARY_HEADERS,
};
use crate::error::{common, ErrorCode, KpiError, Result};
use crate::report::{ReportBook, SectionRows, MAX_SECTION_LABEL_CHARS};

pub const WORKBOOK_FILE: &str = "KPI_Site_Availability_Report.xlsx";

const FALLBACK_SHEET_NAME: &str = "Sheet";

/// Writes every section as a sheet of one workbook, plus the JSON summary.
#[derive(Debug, Clone)]
pub struct XlsxReportWriter {
    output_dir: PathBuf,
}

impl XlsxReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn workbook_path(&self) -> PathBuf {
        self.output_dir.join(WORKBOOK_FILE)
    }

    fn write_workbook(&self, book: &ReportBook) -> Result<PathBuf> {
        let path = self.workbook_path();
        let header = Format::new().set_bold();
        let mut workbook = Workbook::new();
        let mut taken = HashSet::new();

        for section in &book.sections {
            let name = sheet_name(&section.label, &mut taken);
            let sheet = workbook.add_worksheet();
            sheet.set_name(name.as_str()).map_err(|e| sheet_error(&path, &name, e))?;
            write_rows(sheet, &section.rows, &header).map_err(|e| sheet_error(&path, &name, e))?;
            debug!("Added sheet {} ({} rows)", name, section.rows.len());
        }

        workbook
            .save(&path)
            .map_err(|e| common::report_io_error(&path, "saving workbook").with_context(e))?;
        Ok(path)
    }
}

fn write_header(
    sheet: &mut Worksheet,
    headers: &[&str],
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, title) in (0u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *title, format)?;
    }
    Ok(())
}

fn write_rows(
    sheet: &mut Worksheet,
    rows: &SectionRows,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    match rows {
        SectionRows::Sites(rows) => {
            write_header(sheet, &SITE_HEADERS, header)?;
            for (row_num, row) in (1u32..).zip(rows) {
                sheet.write_string(row_num, 0, row.province.as_str())?;
                sheet.write_string(row_num, 1, row.site_id.as_str())?;
                sheet.write_number(row_num, 2, row.downtime_hours)?;
                sheet.write_number(row_num, 3, row.availability_percent)?;
            }
        }
        SectionRows::Provinces(rows) => {
            write_header(sheet, &SUMMARY_HEADERS, header)?;
            for (row_num, row) in (1u32..).zip(rows) {
                sheet.write_string(row_num, 0, row.province.as_str())?;
                sheet.write_number(row_num, 1, row.site_count as f64)?;
                sheet.write_number(row_num, 2, row.downtime_hours)?;
                sheet.write_number(row_num, 3, row.total_capacity_hours)?;
                sheet.write_number(row_num, 4, row.availability_percent)?;
            }
        }
    }
    Ok(())
}

fn sheet_error(path: &Path, sheet: &str, err: XlsxError) -> KpiError {
    KpiError::report_with_code(
        ErrorCode::REPORT_SERIALIZATION_ERROR,
        format!("failed to write sheet '{}'", sheet),
        Some(path.to_path_buf()),
    )
    .with_context(err)
}

/// A valid, unique sheet name for `label`.
///
/// Characters Excel rejects become `_`, the name is capped at
/// [`MAX_SECTION_LABEL_CHARS`], and names already in `taken` (compared
/// case-insensitively) get a `~N` suffix.
pub fn sheet_name(label: &str, taken: &mut HashSet<String>) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches('\'');
    let base = if cleaned.is_empty() {
        FALLBACK_SHEET_NAME
    } else {
        cleaned
    };

    let mut candidate: String = base.chars().take(MAX_SECTION_LABEL_CHARS).collect();
    let mut counter = 1;
    while !taken.insert(candidate.to_lowercase()) {
        counter += 1;
        let suffix = format!("~{}", counter);
        let keep = MAX_SECTION_LABEL_CHARS - suffix.chars().count();
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
    }
    candidate
}

impl ReportWriter for XlsxReportWriter {
    fn write(&self, book: &ReportBook) -> Result<Vec<PathBuf>> {
        create_output_dir(&self.output_dir)?;

        let workbook = self.write_workbook(book)?;
        let summary = write_summary_json(&self.output_dir, book)?;

        info!(
            "Report written to {} ({} sheets)",
            workbook.display(),
            book.sections.len()
        );
        Ok(vec![workbook, summary])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::{KpiReport, ProvinceSummary, SiteWithProvince};
    use crate::report::build_report;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use std::fs::File;
    use std::io::BufReader;
    use tempfile::TempDir;

    fn site(province: &str, site_id: &str, downtime_hours: f64) -> SiteWithProvince {
        SiteWithProvince {
            province: province.to_string(),
            site_id: site_id.to_string(),
            downtime_hours,
            availability_percent: 100.0 - downtime_hours / 624.0 * 100.0,
        }
    }

    fn sample_report() -> KpiReport {
        KpiReport {
            capacity_hours: 624.0,
            registered_site_count: 3,
            ticket_count: 1,
            ticketed_site_count: 1,
            fault_rate: 33.33,
            fault_clear_rate: 100.0,
            sites_by_province: vec![
                site("Nan", "1000001", 2.0),
                site("Tak/North", "2000001", 0.0),
                site("Phra Nakhon Si Ayutthaya Province", "3000001", 0.0),
            ],
            province_summary: vec![ProvinceSummary {
                province: "Nan".to_string(),
                site_count: 1,
                downtime_hours: 2.0,
                total_capacity_hours: 624.0,
                availability_percent: 99.6795,
            }],
        }
    }

    fn open(path: &Path) -> Xlsx<BufReader<File>> {
        open_workbook(path).unwrap()
    }

    #[test]
    fn test_sheet_name_replaces_invalid_characters() {
        let mut taken = HashSet::new();
        assert_eq!(sheet_name("Tak/North", &mut taken), "Tak_North");
        assert_eq!(sheet_name("[a]:b*c?\\", &mut taken), "_a__b_c__");
        assert_eq!(sheet_name("'quoted'", &mut taken), "quoted");
        assert_eq!(sheet_name("   ", &mut taken), "Sheet");
    }

    #[test]
    fn test_sheet_name_is_truncated_and_unique() {
        let mut taken = HashSet::new();
        let long = "Phra Nakhon Si Ayutthaya Province";

        let first = sheet_name(long, &mut taken);
        let second = sheet_name(long, &mut taken);
        let third = sheet_name("NAN", &mut taken);
        let fourth = sheet_name("Nan", &mut taken);

        assert_eq!(first, "Phra Nakhon Si Ayutthaya Provin");
        assert_eq!(second, "Phra Nakhon Si Ayutthaya Prov~2");
        assert_eq!(second.chars().count(), MAX_SECTION_LABEL_CHARS);
        assert_eq!(third, "NAN");
        assert_eq!(fourth, "Nan~2");
    }

    #[test]
    fn test_writes_workbook_and_summary() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("report");
        let writer = XlsxReportWriter::new(&out);

        let written = writer.write(&build_report(&sample_report())).unwrap();

        assert_eq!(written, vec![out.join(WORKBOOK_FILE), out.join("kpi_summary.json")]);

        let mut workbook = open(&written[0]);
        assert_eq!(
            workbook.sheet_names(),
            vec![
                "All_Provinces",
                "Nan",
                "Phra Nakhon Si Ayutthaya Provin",
                "Tak_North",
                "Summary_By_Province",
            ]
        );

        let all = workbook.worksheet_range("All_Provinces").unwrap();
        assert_eq!(all.height(), 4);
        assert_eq!(all.get((0, 3)), Some(&Data::String("Availability (%)".to_string())));
        assert_eq!(all.get((1, 1)), Some(&Data::String("1000001".to_string())));
        assert_eq!(all.get((1, 2)), Some(&Data::Float(2.0)));

        let summary = workbook.worksheet_range("Summary_By_Province").unwrap();
        assert_eq!(summary.get((0, 1)), Some(&Data::String("Site Count".to_string())));
        assert_eq!(summary.get((1, 1)), Some(&Data::Float(1.0)));
        assert_eq!(summary.get((1, 4)), Some(&Data::Float(99.6795)));
    }

    #[test]
    fn test_empty_sections_keep_header_row() {
        let temp = TempDir::new().unwrap();
        let mut report = sample_report();
        report.province_summary.clear();

        let written = XlsxReportWriter::new(temp.path())
            .write(&build_report(&report))
            .unwrap();

        let summary = open(&written[0])
            .worksheet_range("Summary_By_Province")
            .unwrap();
        assert_eq!(summary.height(), 1);
    }

    #[test]
    fn test_unwritable_output_dir_is_report_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("taken");
        std::fs::write(&blocker, "").unwrap();

        let err = XlsxReportWriter::new(&blocker)
            .write(&build_report(&sample_report()))
            .unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}
