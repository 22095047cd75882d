//! NASA net-habitable-volume requirement as a function of mission length.
//!
//! NHV (m³/person) = 6.67 × ln(days) − 7.79
//!
//! The curve comes from a regression over historical missions and is only
//! meaningful for missions of several days or more. For very short missions
//! it drops below zero (−7.79 at one day). The value is returned unclamped;
//! callers that display it should treat a non-positive requirement as "no
//! volume requirement applies".

use crate::error::{ensure_duration, Result};

/// Slope of the logarithmic fit (m³/person per ln-day).
pub const NHV_LOG_COEFFICIENT: f64 = 6.67;
/// Intercept of the logarithmic fit (m³/person).
pub const NHV_INTERCEPT: f64 = 7.79;

/// Durations tabulated in the reference table (days).
pub const NHV_REFERENCE_DAYS: [u32; 6] = [30, 90, 180, 365, 500, 900];

/// Minimum NHV per crew member for a mission of `duration_days`.
pub fn required_nhv_per_person(duration_days: u32) -> Result<f64> {
    ensure_duration(duration_days)?;
    Ok(NHV_LOG_COEFFICIENT * (duration_days as f64).ln() - NHV_INTERCEPT)
}

/// Minimum NHV for the whole crew.
pub fn required_total_nhv(duration_days: u32, crew_size: u32) -> Result<f64> {
    crate::error::ensure_crew_size(crew_size)?;
    Ok(required_nhv_per_person(duration_days)? * crew_size as f64)
}

/// (days, m³/person) rows for [`NHV_REFERENCE_DAYS`].
pub fn reference_table() -> Vec<(u32, f64)> {
    NHV_REFERENCE_DAYS
        .iter()
        .map(|&d| (d, NHV_LOG_COEFFICIENT * (d as f64).ln() - NHV_INTERCEPT))
        .collect()
}
