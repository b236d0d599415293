//! # site-kpi
//!
//! Site availability and fault KPIs for a telecom network, computed per
//! province from region site lists and a trouble-ticket table.
//!
//! ## Usage
//!
//! ```bash
//! site-kpi report --config kpi.toml [--tickets "TT Oct.xlsx"] [--output dir] [--format xlsx|csv] [--capacity-days 26]
//! site-kpi check --config kpi.toml
//! ```
//!
//! ## Modules
//!
//! - `kpi` - Pure aggregation stages: registry, dedup, availability, rollup, fault ratios
//! - `io` - CSV and workbook loaders for site lists and tickets, and the report writers
//! - `report` - Lays a computed run out as named report sections
//! - `config` - TOML run configuration with environment and CLI overrides
//! - `error` - Error type with numeric codes and exit codes
//! - `app` - Logging setup and fatal error handling
//! - `cli` - Argument parsing and command implementations
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod kpi;
pub mod report;

pub use error::{KpiError, Result};
