// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Display-ready projections of an activity.

use crate::models::RawSplit;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Formatted completion date and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/generated/")
)]
pub struct CreatedAt {
    /// Long date, e.g. "Sunday, October 19, 2025"
    pub date: String,
    /// 12-hour time, e.g. "7:05 AM"
    pub time: String,
}

/// Activity statistics formatted for the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/generated/")
)]
pub struct DisplayActivity {
    pub name: String,
    pub created: CreatedAt,
    /// "X.XXkm"
    pub distance: String,
    /// "Xm"
    pub uphill: String,
    /// "Xm"
    pub downhill: String,
    /// "HH:MM:SS"
    pub duration: String,
    /// "M:SS/km"
    pub average_pace: String,
    /// Raw starting elevation in meters
    pub elevation: f64,
    /// "Xm"
    pub starting_elevation: String,
    /// Starting elevation plus ascent, each rounded before summing
    pub highest_point: i64,
    /// Splits as received, consumed by the splits processor
    pub splits: Vec<RawSplit>,
}

/// One row of the splits table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/generated/")
)]
pub struct DisplaySplitRow {
    pub km: String,
    /// "M:SS /km"
    pub pace: String,
    /// Elevation change over the split, "Xm"
    pub elevation: String,
}

/// Detail record and split rows for a single activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/generated/")
)]
pub struct RenderedActivity {
    pub activity: DisplayActivity,
    pub splits: Vec<DisplaySplitRow>,
}
