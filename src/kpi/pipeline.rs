//! End-to-end KPI run over already-loaded inputs.

use serde::Serialize;
use tracing::info;

use super::availability::service_availability_by_site;
use super::capacity::CapacityWindow;
use super::fault::{fault_clear_rate, fault_rate, ticketed_site_count};
use super::model::{ProvinceSummary, SiteWithProvince, TicketRecord};
use super::province::{province_summary, site_availability_by_province};
use super::registry::{build_site_registry, RegionSource, SiteRegistry, SiteSource};
use crate::error::Result;

/// Every table and ratio produced by one run.
#[derive(Debug, Clone, Serialize)]
pub struct KpiReport {
    pub capacity_hours: f64,
    pub registered_site_count: usize,
    pub ticket_count: usize,
    pub ticketed_site_count: usize,
    pub fault_rate: f64,
    pub fault_clear_rate: f64,
    pub sites_by_province: Vec<SiteWithProvince>,
    pub province_summary: Vec<ProvinceSummary>,
}

/// Compute all KPIs from a built registry and the raw ticket table.
pub fn compute_kpis(
    registry: &SiteRegistry,
    tickets: &[TicketRecord],
    capacity: CapacityWindow,
) -> Result<KpiReport> {
    let site_availability = service_availability_by_site(tickets, capacity);
    let sites_by_province = site_availability_by_province(&site_availability, registry);
    let province_summary = province_summary(&site_availability, registry, capacity);
    let fault_rate = fault_rate(tickets, registry)?;
    let fault_clear_rate = fault_clear_rate(tickets);

    info!(
        "Computed KPIs for {} sites in {} provinces (fault rate {:.2}%, fault clear {:.2}%)",
        sites_by_province.len(),
        province_summary.len(),
        fault_rate,
        fault_clear_rate
    );

    Ok(KpiReport {
        capacity_hours: capacity.hours(),
        registered_site_count: registry.len(),
        ticket_count: tickets.len(),
        ticketed_site_count: ticketed_site_count(tickets),
        fault_rate,
        fault_clear_rate,
        sites_by_province,
        province_summary,
    })
}

/// Registry build followed by the KPI stages.
pub struct KpiPipeline<'a> {
    capacity: CapacityWindow,
    regions: &'a [RegionSource],
    site_source: &'a dyn SiteSource,
}

impl<'a> KpiPipeline<'a> {
    pub fn new(
        capacity: CapacityWindow,
        regions: &'a [RegionSource],
        site_source: &'a dyn SiteSource,
    ) -> Self {
        Self {
            capacity,
            regions,
            site_source,
        }
    }

    pub fn build_registry(&self) -> Result<SiteRegistry> {
        build_site_registry(self.regions, self.site_source)
    }

    pub fn run(&self, tickets: &[TicketRecord]) -> Result<KpiReport> {
        let registry = self.build_registry()?;
        compute_kpis(&registry, tickets, self.capacity)
    }
}
