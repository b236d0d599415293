//! Typed records flowing between the aggregation stages.
//!
//! Output records serialize with the column headers the availability report
//! has always used, so report sections line up with the historical sheets.

use serde::Serialize;

use super::numeric::{coerce_numeric_or_zero, finite_or_zero};

pub const MINUTES_PER_HOUR: f64 = 60.0;

/// One registered site and the province it reports under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRecord {
    #[serde(rename = "SITEID")]
    pub site_id: String,
    #[serde(rename = "PROVINCE")]
    pub province: String,
}

impl SiteRecord {
    pub fn new(site_id: impl Into<String>, province: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            province: province.into(),
        }
    }
}

/// A single trouble-ticket row.
///
/// Identifiers are optional because exports carry rows with a blank site or
/// ticket id. Such rows still count toward the fault ratios; only the
/// downtime dedup needs both ids. Numeric fields are always finite; raw cells
/// are converted with [`coerce_numeric_or_zero`] when the record is built.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketRecord {
    pub site_id: Option<String>,
    pub ticket_id: Option<String>,
    pub down_time_minutes: f64,
    /// Hours within which the ticket must be cleared for its urgency level.
    pub true_urgency_hours: f64,
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl TicketRecord {
    pub fn new(
        site_id: impl Into<String>,
        ticket_id: impl Into<String>,
        down_time_minutes: f64,
        true_urgency_hours: f64,
    ) -> Self {
        Self {
            site_id: Some(site_id.into()),
            ticket_id: Some(ticket_id.into()),
            down_time_minutes: finite_or_zero(down_time_minutes),
            true_urgency_hours: finite_or_zero(true_urgency_hours),
        }
    }

    /// Build a record from raw spreadsheet cells. Blank ids become `None`.
    pub fn from_raw(
        site_id: Option<&str>,
        ticket_id: Option<&str>,
        down_time: Option<&str>,
        true_urgency: Option<&str>,
    ) -> Self {
        Self {
            site_id: non_blank(site_id),
            ticket_id: non_blank(ticket_id),
            down_time_minutes: coerce_numeric_or_zero(down_time),
            true_urgency_hours: coerce_numeric_or_zero(true_urgency),
        }
    }

    /// The (site, ticket) key used for dedup, if both ids are present.
    pub fn dedup_key(&self) -> Option<(&str, &str)> {
        Some((self.site_id.as_deref()?, self.ticket_id.as_deref()?))
    }

    pub fn down_time_hours(&self) -> f64 {
        self.down_time_minutes / MINUTES_PER_HOUR
    }
}

/// Deduplicated downtime for one site with at least one ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDowntime {
    #[serde(rename = "SITE_7DIGITS")]
    pub site_id: String,
    #[serde(rename = "DOWNTIME_MINS")]
    pub downtime_minutes: f64,
    #[serde(rename = "DOWNTIME_HR")]
    pub downtime_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteAvailability {
    #[serde(rename = "SITE_7DIGITS")]
    pub site_id: String,
    #[serde(rename = "DOWNTIME_MINS")]
    pub downtime_minutes: f64,
    #[serde(rename = "DOWNTIME_HR")]
    pub downtime_hours: f64,
    #[serde(rename = "Availability (%)")]
    pub availability_percent: f64,
}

/// A registered site joined with its availability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteWithProvince {
    #[serde(rename = "PROVINCE")]
    pub province: String,
    #[serde(rename = "SITE_7DIGITS")]
    pub site_id: String,
    #[serde(rename = "DOWNTIME_HR")]
    pub downtime_hours: f64,
    #[serde(rename = "Availability (%)")]
    pub availability_percent: f64,
}

/// Capacity-weighted availability for one province.
///
/// Field order is the report's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceSummary {
    #[serde(rename = "PROVINCE")]
    pub province: String,
    #[serde(rename = "Site Count")]
    pub site_count: usize,
    #[serde(rename = "DOWNTIME_HR")]
    pub downtime_hours: f64,
    #[serde(rename = "Total Time (hr)")]
    pub total_capacity_hours: f64,
    #[serde(rename = "Availability (%)")]
    pub availability_percent: f64,
}
