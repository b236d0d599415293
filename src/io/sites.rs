//! Per-region site lists, exported as CSV or kept as spreadsheets.

use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use super::table::{open_table, read_csv_table, Table};
use crate::error::{common, Result};
use crate::kpi::{RegionSource, SiteRow, SiteSource};

/// Accepted headers for the site identifier, in order of preference.
pub const SITE_ID_COLUMNS: &[&str] = &["SITEID", "LOCATION ID"];
/// Province headers some lists carry. Read, but never trusted over the region key.
pub const PROVINCE_COLUMNS: &[&str] = &["PROVINCE", "PROVINCE_E"];

/// Extract site rows from a loaded table. Rows with a blank identifier are
/// dropped.
pub fn site_rows_from_table(table: &Table, origin: &Path) -> Result<Vec<SiteRow>> {
    let site_col = table
        .column(SITE_ID_COLUMNS)
        .ok_or_else(|| common::missing_column(origin, &[SITE_ID_COLUMNS.join(" or ").as_str()]))?;
    let province_col = table.column(PROVINCE_COLUMNS);

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut blank = 0usize;
    for record in &table.rows {
        let site_id = record.get(site_col).unwrap_or_default();
        if site_id.is_empty() {
            blank += 1;
            continue;
        }

        rows.push(SiteRow {
            site_id: site_id.to_string(),
            province: province_col
                .and_then(|col| record.get(col))
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        });
    }

    if blank > 0 {
        warn!("Skipped {} rows without a site id in {}", blank, origin.display());
    }
    debug!("Read {} site rows from {}", rows.len(), origin.display());

    Ok(rows)
}

/// Parse site rows from CSV content.
pub fn read_site_rows<R: Read>(reader: R, origin: &Path) -> Result<Vec<SiteRow>> {
    site_rows_from_table(&read_csv_table(reader, origin)?, origin)
}

/// Loads region site lists from disk. Spreadsheet extensions are read as
/// workbooks, everything else as CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSiteSource;

impl SiteSource for FileSiteSource {
    fn load_sites(&self, region: &RegionSource) -> Result<Option<Vec<SiteRow>>> {
        match open_table(&region.source)? {
            Some(table) => site_rows_from_table(&table, &region.source).map(Some),
            None => Ok(None),
        }
    }
}
