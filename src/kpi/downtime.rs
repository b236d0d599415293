use std::collections::BTreeMap;
use tracing::debug;

use super::model::{SiteDowntime, TicketRecord, MINUTES_PER_HOUR};

/// Collapse tickets into per-site downtime.
///
/// A ticket re-logged several times under the same (site, ticket) pair
/// counts once, at the largest downtime reported for it. Sites without
/// tickets do not appear in the output, which is ordered by site id. Rows
/// missing either id cannot be grouped and contribute no downtime.
pub fn site_downtime(tickets: &[TicketRecord]) -> Vec<SiteDowntime> {
    let mut per_ticket: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    let mut unkeyed = 0usize;
    for ticket in tickets {
        let Some(key) = ticket.dedup_key() else {
            unkeyed += 1;
            continue;
        };
        per_ticket
            .entry(key)
            .and_modify(|minutes| *minutes = minutes.max(ticket.down_time_minutes))
            .or_insert(ticket.down_time_minutes);
    }

    let mut per_site: BTreeMap<&str, f64> = BTreeMap::new();
    for ((site_id, _), minutes) in &per_ticket {
        *per_site.entry(site_id).or_insert(0.0) += minutes;
    }

    debug!(
        "Deduplicated {} ticket rows into {} tickets across {} sites ({} rows without a site or ticket id)",
        tickets.len(),
        per_ticket.len(),
        per_site.len(),
        unkeyed
    );

    per_site
        .into_iter()
        .map(|(site_id, downtime_minutes)| SiteDowntime {
            site_id: site_id.to_string(),
            downtime_minutes,
            downtime_hours: downtime_minutes / MINUTES_PER_HOUR,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ticket_counts_largest_value_once() {
        let tickets = vec![
            TicketRecord::new("1000001", "TT-1", 30.0, 4.0),
            TicketRecord::new("1000001", "TT-1", 45.0, 4.0),
        ];

        let downtime = site_downtime(&tickets);

        assert_eq!(downtime.len(), 1);
        assert_eq!(downtime[0].downtime_minutes, 45.0);
        assert_eq!(downtime[0].downtime_hours, 0.75);
    }

    #[test]
    fn test_single_ticket_minutes_to_hours() {
        let tickets = vec![TicketRecord::new("1000001", "TT-1", 120.0, 4.0)];
        let downtime = site_downtime(&tickets);
        assert_eq!(downtime[0].downtime_hours, 2.0);
    }

    #[test]
    fn test_distinct_tickets_are_summed_per_site() {
        let tickets = vec![
            TicketRecord::new("2000002", "TT-9", 60.0, 4.0),
            TicketRecord::new("1000001", "TT-1", 30.0, 4.0),
            TicketRecord::new("1000001", "TT-2", 90.0, 4.0),
            TicketRecord::new("1000001", "TT-2", 10.0, 4.0),
        ];

        let downtime = site_downtime(&tickets);

        assert_eq!(downtime.len(), 2);
        assert_eq!(downtime[0].site_id, "1000001");
        assert_eq!(downtime[0].downtime_minutes, 120.0);
        assert_eq!(downtime[1].site_id, "2000002");
        assert_eq!(downtime[1].downtime_hours, 1.0);
    }

    #[test]
    fn test_same_ticket_id_on_different_sites_is_not_merged() {
        let tickets = vec![
            TicketRecord::new("1000001", "TT-1", 30.0, 4.0),
            TicketRecord::new("2000002", "TT-1", 45.0, 4.0),
        ];

        let downtime = site_downtime(&tickets);

        assert_eq!(downtime.len(), 2);
        assert_eq!(downtime[0].downtime_minutes, 30.0);
        assert_eq!(downtime[1].downtime_minutes, 45.0);
    }

    #[test]
    fn test_ticket_with_zero_downtime_still_lists_site() {
        let tickets = vec![TicketRecord::from_raw(Some("1000001"), Some("TT-1"), Some("-"), None)];
        let downtime = site_downtime(&tickets);
        assert_eq!(downtime.len(), 1);
        assert_eq!(downtime[0].downtime_hours, 0.0);
    }

    #[test]
    fn test_rows_without_both_ids_add_no_downtime() {
        let tickets = vec![
            TicketRecord::new("1000001", "TT-1", 60.0, 4.0),
            TicketRecord::from_raw(Some("1000001"), None, Some("600"), Some("4")),
            TicketRecord::from_raw(None, Some("TT-9"), Some("600"), Some("4")),
        ];
        let downtime = site_downtime(&tickets);
        assert_eq!(downtime.len(), 1);
        assert_eq!(downtime[0].downtime_minutes, 60.0);
    }

    #[test]
    fn test_no_tickets_yields_no_rows() {
        assert!(site_downtime(&[]).is_empty());
    }
}
