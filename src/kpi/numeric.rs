//! Numeric leniency policy for spreadsheet-sourced values.
//!
//! Trouble-ticket exports routinely carry blank cells, `-`, `N/A` and similar
//! placeholders in numeric columns. Rather than rejecting the row, every
//! numeric cell goes through [`coerce_numeric_or_zero`], which maps anything
//! that is not a finite number to `0.0`.

/// Parse a raw cell into a finite number, falling back to `0.0`.
///
/// Surrounding whitespace is ignored. Missing cells, unparsable text and
/// non-finite values (`NaN`, `inf`) all become `0.0`.
pub fn coerce_numeric_or_zero(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

/// Replace `NaN` and infinities with `0.0`.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round half away from zero to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
