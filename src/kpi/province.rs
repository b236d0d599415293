//! Province rollup of site availability.
//!
//! Both operations left-join the registry against the ticketed sites: a
//! registered site with no tickets was never down, so it contributes zero
//! downtime and full availability rather than being dropped.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::capacity::CapacityWindow;
use super::model::{ProvinceSummary, SiteAvailability, SiteWithProvince};
use super::numeric::round_to;
use super::registry::SiteRegistry;

const FULL_AVAILABILITY: f64 = 100.0;
const PROVINCE_AVAILABILITY_DECIMALS: u32 = 4;

fn index_by_site(availability: &[SiteAvailability]) -> HashMap<&str, &SiteAvailability> {
    availability
        .iter()
        .map(|site| (site.site_id.as_str(), site))
        .collect()
}

/// Every registered site with its province and availability, sorted by
/// (province, site id).
pub fn site_availability_by_province(
    availability: &[SiteAvailability],
    registry: &SiteRegistry,
) -> Vec<SiteWithProvince> {
    let by_site = index_by_site(availability);

    let mut rows: Vec<SiteWithProvince> = registry
        .iter()
        .map(|record| {
            let (downtime_hours, availability_percent) = by_site
                .get(record.site_id.as_str())
                .map(|site| (site.downtime_hours, site.availability_percent))
                .unwrap_or((0.0, FULL_AVAILABILITY));
            SiteWithProvince {
                province: record.province.clone(),
                site_id: record.site_id.clone(),
                downtime_hours,
                availability_percent,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.province
            .cmp(&b.province)
            .then_with(|| a.site_id.cmp(&b.site_id))
    });
    rows
}

/// Capacity-weighted availability per province, sorted by province.
///
/// The province percentage comes from summed downtime over summed capacity,
/// not from averaging site percentages. It is not clamped, so downtime beyond
/// capacity shows up as a negative percentage.
pub fn province_summary(
    availability: &[SiteAvailability],
    registry: &SiteRegistry,
    capacity: CapacityWindow,
) -> Vec<ProvinceSummary> {
    let by_site = index_by_site(availability);

    #[derive(Default)]
    struct Acc {
        site_count: usize,
        downtime_hours: f64,
    }

    // The registry holds each site once, so counting rows counts distinct sites.
    let mut provinces: BTreeMap<&str, Acc> = BTreeMap::new();
    for record in registry.iter() {
        let acc = provinces.entry(record.province.as_str()).or_default();
        acc.site_count += 1;
        acc.downtime_hours += by_site
            .get(record.site_id.as_str())
            .map_or(0.0, |site| site.downtime_hours);
    }

    debug!("Rolled up {} sites into {} provinces", registry.len(), provinces.len());

    provinces
        .into_iter()
        .map(|(province, acc)| {
            let total_capacity_hours = acc.site_count as f64 * capacity.hours();
            let availability_percent = round_to(
                (total_capacity_hours - acc.downtime_hours) / total_capacity_hours * 100.0,
                PROVINCE_AVAILABILITY_DECIMALS,
            );
            ProvinceSummary {
                province: province.to_string(),
                site_count: acc.site_count,
                downtime_hours: acc.downtime_hours,
                total_capacity_hours,
                availability_percent,
            }
        })
        .collect()
}
