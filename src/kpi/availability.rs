use super::capacity::CapacityWindow;
use super::downtime::site_downtime;
use super::model::{SiteAvailability, SiteDowntime, TicketRecord};

/// Share of the window a site was up, saturating at 0% when the reported
/// downtime exceeds the window.
pub fn availability_percent(downtime_hours: f64, capacity: CapacityWindow) -> f64 {
    let total = capacity.hours();
    ((total - downtime_hours) / total * 100.0).max(0.0)
}

pub fn site_availability(
    downtime: Vec<SiteDowntime>,
    capacity: CapacityWindow,
) -> Vec<SiteAvailability> {
    downtime
        .into_iter()
        .map(|site| SiteAvailability {
            availability_percent: availability_percent(site.downtime_hours, capacity),
            site_id: site.site_id,
            downtime_minutes: site.downtime_minutes,
            downtime_hours: site.downtime_hours,
        })
        .collect()
}

/// Deduplicate tickets and compute availability for every ticketed site.
pub fn service_availability_by_site(
    tickets: &[TicketRecord],
    capacity: CapacityWindow,
) -> Vec<SiteAvailability> {
    site_availability(site_downtime(tickets), capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn october() -> CapacityWindow {
        CapacityWindow::from_days(26.0).unwrap()
    }

    #[test]
    fn test_availability_percent() {
        assert_eq!(availability_percent(0.0, october()), 100.0);
        assert_eq!(availability_percent(312.0, october()), 50.0);
        assert_eq!(availability_percent(624.0, october()), 0.0);
    }

    #[test]
    fn test_over_reported_downtime_clamps_to_zero() {
        assert_eq!(availability_percent(700.0, october()), 0.0);
    }

    #[test]
    fn test_service_availability_by_site() {
        let tickets = vec![
            TicketRecord::new("1000001", "TT-1", 6240.0, 4.0),
            TicketRecord::new("1000001", "TT-1", 3120.0, 4.0),
            TicketRecord::new("2000002", "TT-2", 60.0 * 700.0, 4.0),
        ];

        let sites = service_availability_by_site(&tickets, october());

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].site_id, "1000001");
        assert_eq!(sites[0].downtime_hours, 104.0);
        assert!((sites[0].availability_percent - 83.333_333).abs() < 1e-5);
        assert_eq!(sites[1].downtime_hours, 700.0);
        assert_eq!(sites[1].availability_percent, 0.0);
    }
}
