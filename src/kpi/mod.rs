//! KPI aggregation core
//!
//! Pure, synchronous stages over typed tables:
//!
//! 1. [`registry`] merges per-region site lists into one site registry.
//! 2. [`downtime`] deduplicates tickets and sums downtime per site.
//! 3. [`availability`] turns site downtime into availability percentages.
//! 4. [`province`] joins sites to provinces and rolls availability up.
//! 5. [`fault`] computes the fault rate and fault clear rate.
//!
//! [`pipeline`] runs the stages in order for one reporting period. None of
//! these modules touch the filesystem; loading goes through the
//! [`registry::SiteSource`] seam and the loaders in [`crate::io`].

pub mod availability;
pub mod capacity;
pub mod downtime;
pub mod fault;
pub mod model;
pub mod numeric;
pub mod pipeline;
pub mod province;
pub mod registry;

pub use availability::{availability_percent, service_availability_by_site, site_availability};
pub use capacity::CapacityWindow;
pub use downtime::site_downtime;
pub use fault::{cleared_on_time, fault_clear_rate, fault_rate, ticketed_site_count};
pub use model::{
    ProvinceSummary, SiteAvailability, SiteDowntime, SiteRecord, SiteWithProvince, TicketRecord,
};
pub use numeric::coerce_numeric_or_zero;
pub use pipeline::{compute_kpis, KpiPipeline, KpiReport};
pub use province::{province_summary, site_availability_by_province};
pub use registry::{build_site_registry, RegionSource, SiteRegistry, SiteRow, SiteSource};
