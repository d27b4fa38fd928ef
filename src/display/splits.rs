// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-split rows for the splits table.

use super::{ensure_finite, minutes_and_seconds, round_meters, validate_split, FormatError};
use crate::models::{DisplaySplitRow, RawSplit};

/// Build one display row per split, in input order.
///
/// The first split's elevation change is measured from `start_elevation`;
/// every later split is measured from the split before it.
pub fn process(
    splits: &[RawSplit],
    start_elevation: f64,
) -> Result<Vec<DisplaySplitRow>, FormatError> {
    super::ensure_finite("Elevation", start_elevation)?;

    let mut previous_elevation = start_elevation;
    let mut rows = Vec::with_capacity(splits.len());

    for (index, split) in splits.iter().enumerate() {
        validate_split(split)?;

        let delta = ensure_finite("Splits.Elevation", split.elevation - previous_elevation)?;
        rows.push(DisplaySplitRow {
            km: km_label(split.distance, index)?,
            pace: pace_label(split.split_time),
            elevation: format!("{}m", round_meters(delta)),
        });
        previous_elevation = split.elevation;
    }

    Ok(rows)
}

/// Kilometer column label.
///
/// Splits shorter than a kilometer show their length with two decimals.
/// Otherwise the label is the rounded kilometer count plus the split index,
/// which numbers consecutive 1 km splits 1, 2, 3, ...
fn km_label(distance_m: f64, index: usize) -> Result<String, FormatError> {
    let km = distance_m / 1000.0;
    if km < 1.0 {
        return Ok(format!("{:.2}", km));
    }

    let out_of_range = FormatError::OutOfRange {
        field: "Splits.Distance",
        value: distance_m,
    };
    let rounded = km.round();
    // u64::MAX as f64 rounds up to 2^64, so the comparison must be strict
    if rounded >= u64::MAX as f64 {
        return Err(out_of_range);
    }
    (rounded as u64)
        .checked_add(index as u64)
        .map(|label| label.to_string())
        .ok_or(out_of_range)
}

/// Split time in seconds as "M:SS /km".
fn pace_label(split_time: f64) -> String {
    let (minutes, seconds) = minutes_and_seconds(split_time / 60.0);
    format!("{}:{:02} /km", minutes, seconds)
}
