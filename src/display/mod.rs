// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity display pipeline.
//!
//! Turns a raw activity record into display-ready values:
//! 1. [`stats::StatsFormatter`] formats the summary statistics
//! 2. [`splits::process`] builds one table row per split
//! 3. [`panel::render_text`] lays both out as plain text for the terminal
//!
//! Everything here is pure; callers fetch and persist data elsewhere.

pub mod panel;
pub mod splits;
pub mod stats;

pub use stats::StatsFormatter;

use crate::models::{RawActivity, RawSplit, RenderedActivity};
use chrono::TimeZone;
use std::fmt::Display;

/// Errors from formatting an activity.
///
/// Any of these fails the whole operation; no partially formatted record is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("Malformed activity data: {0}")]
    Malformed(String),

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} is too large to display (got {value})")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Invalid CompletedDate {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },
}

/// Parse a raw activity from its JSON wire form.
pub fn parse_raw_activity(json: &str) -> Result<RawActivity, FormatError> {
    serde_json::from_str(json).map_err(|e| FormatError::Malformed(e.to_string()))
}

/// Run the full pipeline: summary statistics, then split rows.
pub fn render<Tz>(
    formatter: &StatsFormatter<Tz>,
    raw: RawActivity,
) -> Result<RenderedActivity, FormatError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let activity = formatter.format(raw)?;
    let splits = splits::process(&activity.splits, activity.elevation)?;
    Ok(RenderedActivity { activity, splits })
}

/// Split fractional minutes into whole minutes and rounded seconds.
///
/// A remainder that rounds up to 60 seconds carries into the next minute.
pub(crate) fn minutes_and_seconds(minutes: f64) -> (u64, u64) {
    let whole = minutes.trunc();
    let seconds = ((minutes - whole) * 60.0).round() as u64;
    let whole = whole as u64;
    if seconds >= 60 {
        (whole + 1, seconds - 60)
    } else {
        (whole, seconds)
    }
}

/// Round meters to the nearest integer, half away from zero.
pub(crate) fn round_meters(meters: f64) -> i64 {
    // `as` maps -0.0 to 0, so tiny negative deltas never render as "-0m"
    meters.round() as i64
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, FormatError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormatError::NonFinite { field })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, FormatError> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(FormatError::Negative { field, value });
    }
    Ok(value)
}

pub(crate) fn validate_split(split: &RawSplit) -> Result<(), FormatError> {
    ensure_non_negative("Splits.Distance", split.distance)?;
    ensure_non_negative("Splits.SplitTime", split.split_time)?;
    ensure_finite("Splits.Elevation", split.elevation)?;
    Ok(())
}
