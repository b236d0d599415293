//! Site registry: one row per site, tagged with the province of the region
//! list it was loaded from.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::model::SiteRecord;
use crate::error::{ErrorCode, KpiError, Result};

/// A province and the site list that enumerates its sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSource {
    pub province: String,
    pub source: PathBuf,
}

impl RegionSource {
    pub fn new(province: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            province: province.into(),
            source: source.into(),
        }
    }
}

/// A site row as it appears in a region list.
///
/// `province` holds whatever province column the list carried. The registry
/// never uses it: the region's configured province always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRow {
    pub site_id: String,
    pub province: Option<String>,
}

impl SiteRow {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            province: None,
        }
    }
}

/// Loads the site rows of one region.
pub trait SiteSource {
    /// Returns `Ok(None)` when the region's list does not exist.
    fn load_sites(&self, region: &RegionSource) -> Result<Option<Vec<SiteRow>>>;
}

impl<F> SiteSource for F
where
    F: Fn(&RegionSource) -> Result<Option<Vec<SiteRow>>>,
{
    fn load_sites(&self, region: &RegionSource) -> Result<Option<Vec<SiteRow>>> {
        self(region)
    }
}

/// Registered sites in load order, each site exactly once.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    records: Vec<SiteRecord>,
    index: HashMap<String, usize>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a site, returning the province it previously belonged to.
    ///
    /// A site registered again keeps its original position but takes the
    /// newer province.
    pub fn insert(
        &mut self,
        site_id: impl Into<String>,
        province: impl Into<String>,
    ) -> Option<String> {
        let site_id = site_id.into();
        let province = province.into();
        match self.index.get(&site_id) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos].province, province)),
            None => {
                self.index.insert(site_id.clone(), self.records.len());
                self.records.push(SiteRecord { site_id, province });
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteRecord> {
        self.records.iter()
    }

    pub fn contains(&self, site_id: &str) -> bool {
        self.index.contains_key(site_id)
    }
}

impl FromIterator<SiteRecord> for SiteRegistry {
    fn from_iter<I: IntoIterator<Item = SiteRecord>>(iter: I) -> Self {
        let mut registry = Self::new();
        for record in iter {
            registry.insert(record.site_id, record.province);
        }
        registry
    }
}

/// Merge every region's site list into one registry.
///
/// Regions whose list is missing are skipped with a warning. Failing to load
/// any list at all is fatal.
pub fn build_site_registry(
    regions: &[RegionSource],
    source: &dyn SiteSource,
) -> Result<SiteRegistry> {
    let mut registry = SiteRegistry::new();
    let mut loaded_sources = 0usize;

    for region in regions {
        let rows = match source.load_sites(region)? {
            Some(rows) => rows,
            None => {
                warn!(
                    "Site list for {} not found: {}",
                    region.province,
                    region.source.display()
                );
                continue;
            }
        };

        loaded_sources += 1;
        debug!("Loaded {} site rows for {}", rows.len(), region.province);

        for row in rows {
            if let Some(previous) = registry.insert(row.site_id.as_str(), region.province.as_str()) {
                if previous != region.province {
                    warn!(
                        "Site {} listed under both {} and {}; keeping {}",
                        row.site_id, previous, region.province, region.province
                    );
                }
            }
        }
    }

    if loaded_sources == 0 {
        return Err(KpiError::data_with_code(
            ErrorCode::DATA_NO_SITE_SOURCES,
            format!("none of the {} configured site lists could be loaded", regions.len()),
        ));
    }

    info!(
        "Site registry built: {} sites from {} of {} site lists",
        registry.len(),
        loaded_sources,
        regions.len()
    );

    Ok(registry)
}
