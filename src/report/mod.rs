//! Report layout
//!
//! Arranges a [`KpiReport`] into named sections: every site, one section per
//! province, then the province summary. Writers only decide how sections are
//! persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::kpi::{KpiReport, ProvinceSummary, SiteWithProvince};

pub const ALL_PROVINCES_SECTION: &str = "All_Provinces";
pub const SUMMARY_SECTION: &str = "Summary_By_Province";

/// Section labels are capped at the spreadsheet sheet-name limit.
pub const MAX_SECTION_LABEL_CHARS: usize = 31;

#[derive(Debug, Clone, PartialEq)]
pub enum SectionRows {
    Sites(Vec<SiteWithProvince>),
    Provinces(Vec<ProvinceSummary>),
}

impl SectionRows {
    pub fn len(&self) -> usize {
        match self {
            Self::Sites(rows) => rows.len(),
            Self::Provinces(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub label: String,
    pub rows: SectionRows,
}

/// Headline figures written alongside the tables.
#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    pub generated_at: DateTime<Utc>,
    pub capacity_hours: f64,
    pub registered_sites: usize,
    pub ticket_rows: usize,
    pub ticketed_sites: usize,
    pub fault_rate_percent: f64,
    pub fault_clear_rate_percent: f64,
    pub provinces: Vec<ProvinceSummary>,
}

impl KpiSummary {
    pub fn from_report(report: &KpiReport) -> Self {
        Self {
            generated_at: Utc::now(),
            capacity_hours: report.capacity_hours,
            registered_sites: report.registered_site_count,
            ticket_rows: report.ticket_count,
            ticketed_sites: report.ticketed_site_count,
            fault_rate_percent: report.fault_rate,
            fault_clear_rate_percent: report.fault_clear_rate,
            provinces: report.province_summary.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportBook {
    pub sections: Vec<ReportSection>,
    pub summary: KpiSummary,
}

/// Truncate a label to [`MAX_SECTION_LABEL_CHARS`] characters.
pub fn section_label(name: &str) -> String {
    name.chars().take(MAX_SECTION_LABEL_CHARS).collect()
}

/// Split site rows by province, provinces in ascending order. Row order
/// within a province is preserved.
pub fn partition_by_province(rows: &[SiteWithProvince]) -> BTreeMap<&str, Vec<SiteWithProvince>> {
    let mut partitions: BTreeMap<&str, Vec<SiteWithProvince>> = BTreeMap::new();
    for row in rows {
        partitions
            .entry(row.province.as_str())
            .or_default()
            .push(row.clone());
    }
    partitions
}

pub fn build_report(report: &KpiReport) -> ReportBook {
    let mut sections = vec![ReportSection {
        label: ALL_PROVINCES_SECTION.to_string(),
        rows: SectionRows::Sites(report.sites_by_province.clone()),
    }];

    sections.extend(
        partition_by_province(&report.sites_by_province)
            .into_iter()
            .map(|(province, rows)| ReportSection {
                label: section_label(province),
                rows: SectionRows::Sites(rows),
            }),
    );

    sections.push(ReportSection {
        label: SUMMARY_SECTION.to_string(),
        rows: SectionRows::Provinces(report.province_summary.clone()),
    });

    ReportBook {
        sections,
        summary: KpiSummary::from_report(report),
    }
}
