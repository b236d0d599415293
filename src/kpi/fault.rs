use std::collections::HashSet;
use tracing::debug;

use super::model::TicketRecord;
use super::numeric::round_to;
use super::registry::SiteRegistry;
use crate::error::{common, Result};

const RATIO_DECIMALS: u32 = 2;

fn ticketed_sites(tickets: &[TicketRecord]) -> HashSet<&str> {
    tickets
        .iter()
        .filter_map(|t| t.site_id.as_deref())
        .collect()
}

/// Number of distinct site ids across all ticket rows, including rows
/// without a ticket id. Rows without a site id are ignored.
pub fn ticketed_site_count(tickets: &[TicketRecord]) -> usize {
    ticketed_sites(tickets).len()
}

/// Percentage of registered sites that raised at least one ticket.
///
/// Ticketed sites are counted as in [`ticketed_site_count`], whether or not
/// they appear in the registry. An empty registry has no meaningful fault
/// rate and is an error.
pub fn fault_rate(tickets: &[TicketRecord], registry: &SiteRegistry) -> Result<f64> {
    if registry.is_empty() {
        return Err(common::division_by_zero("fault rate (no registered sites)"));
    }

    let faulted = ticketed_sites(tickets);
    let unregistered = faulted.iter().filter(|id| !registry.contains(id)).count();
    if unregistered > 0 {
        debug!("{} ticketed sites are not in the site registry", unregistered);
    }

    let ratio = faulted.len() as f64 / registry.len() as f64;
    Ok(round_to(ratio * 100.0, RATIO_DECIMALS))
}

/// A ticket is cleared on time when its downtime does not exceed its urgency
/// threshold; equality counts as on time.
pub fn cleared_on_time(ticket: &TicketRecord) -> bool {
    ticket.down_time_hours() <= ticket.true_urgency_hours
}

/// Percentage of ticket rows cleared within their urgency threshold. Every
/// row counts, with or without ids.
///
/// Returns `0.0` for an empty ticket table.
pub fn fault_clear_rate(tickets: &[TicketRecord]) -> f64 {
    if tickets.is_empty() {
        return 0.0;
    }
    let cleared = tickets.iter().filter(|t| cleared_on_time(t)).count();
    round_to(cleared as f64 / tickets.len() as f64 * 100.0, RATIO_DECIMALS)
}
