//! Trouble-ticket table, exported as CSV or kept as a spreadsheet.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use super::table::{open_table, read_csv_table, Table};
use crate::error::{common, ErrorCode, KpiError, Result};
use crate::kpi::TicketRecord;

pub const TICKET_COLUMNS: &[&str] = &["SITE_7DIGITS", "TICKETID", "DOWN_TIME", "TRUEURGENCY"];

/// Raw ticket row; every cell stays text until [`TicketRecord::from_raw`]
/// applies the numeric coercion policy. Cells past the end of a short row
/// read as `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTicketRow {
    #[serde(rename = "SITE_7DIGITS")]
    site_id: Option<String>,
    #[serde(rename = "TICKETID")]
    ticket_id: Option<String>,
    #[serde(rename = "DOWN_TIME")]
    down_time: Option<String>,
    #[serde(rename = "TRUEURGENCY")]
    true_urgency: Option<String>,
}

/// Convert a loaded table into ticket records.
///
/// All four ticket columns must be present. Every row is kept, including
/// rows without a site or ticket id: they still count toward the fault
/// ratios and are only left out of per-site downtime.
pub fn tickets_from_table(table: &Table, origin: &Path) -> Result<Vec<TicketRecord>> {
    let missing = table.missing_columns(TICKET_COLUMNS);
    if !missing.is_empty() {
        return Err(common::missing_column(origin, &missing));
    }

    let mut tickets = Vec::with_capacity(table.rows.len());
    for (index, record) in table.rows.iter().enumerate() {
        let row: RawTicketRow = record.deserialize(Some(&table.headers)).map_err(|e| {
            KpiError::source_with_code(
                ErrorCode::SOURCE_MALFORMED_ROW,
                format!("malformed row {}", index + 2),
                Some(origin.to_path_buf()),
            )
            .with_source(e)
        })?;

        tickets.push(TicketRecord::from_raw(
            row.site_id.as_deref(),
            row.ticket_id.as_deref(),
            row.down_time.as_deref(),
            row.true_urgency.as_deref(),
        ));
    }

    let unkeyed = tickets.iter().filter(|t| t.dedup_key().is_none()).count();
    if unkeyed > 0 {
        warn!(
            "{} ticket rows in {} lack a site or ticket id; they count toward the fault ratios only",
            unkeyed,
            origin.display()
        );
    }

    Ok(tickets)
}

/// Parse ticket rows from CSV content.
pub fn read_tickets<R: Read>(reader: R, origin: &Path) -> Result<Vec<TicketRecord>> {
    tickets_from_table(&read_csv_table(reader, origin)?, origin)
}

/// Load the ticket table. Unlike site lists, a missing ticket file is fatal.
pub fn load_tickets(path: &Path) -> Result<Vec<TicketRecord>> {
    let table = open_table(path)?.ok_or_else(|| {
        KpiError::source_with_code(
            ErrorCode::SOURCE_NOT_FOUND,
            "ticket file not found",
            Some(path.to_path_buf()),
        )
    })?;

    let tickets = tickets_from_table(&table, path)?;
    info!("Loaded {} ticket rows from {}", tickets.len(), path.display());
    Ok(tickets)
}
