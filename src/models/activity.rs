// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One split of an activity (normally a full kilometer, the last one may be partial).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/generated/")
)]
pub struct RawSplit {
    /// Distance covered by the split in meters
    pub distance: f64,
    /// Time taken for the split in seconds
    pub split_time: f64,
    /// Absolute elevation at the end of the split in meters
    pub elevation: f64,
}

/// Raw activity record as served by `/gpx/{id}/detail`.
///
/// Field names are PascalCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/generated/")
)]
pub struct RawActivity {
    /// Activity name/title
    pub name: String,
    /// Completion date/time (RFC 3339)
    pub completed_date: String,
    /// Moving distance in meters
    pub distance: f64,
    /// Total ascent in meters
    pub uphill: f64,
    /// Total descent in meters
    pub downhill: f64,
    /// Elapsed time in seconds
    pub time: f64,
    /// Average pace in fractional minutes per kilometer
    pub average_pace: f64,
    /// Starting elevation in meters
    pub elevation: f64,
    /// Per-split measurements in track order
    pub splits: Vec<RawSplit>,
}

/// Activity record as stored in SQLite.
#[derive(Debug, Clone)]
pub struct Activity {
    /// Row ID (1-based, used in API paths)
    pub id: i64,
    /// When the activity was imported (RFC 3339)
    pub created_at: String,
    /// GPX document as imported
    pub gpx: Vec<u8>,
    /// SHA-256 of `gpx`, hex encoded
    pub gpx_hash: String,
    /// Derived statistics
    pub details: RawActivity,
}

/// An activity that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub gpx: Vec<u8>,
    /// SHA-256 of `gpx`, hex encoded
    pub gpx_hash: String,
    pub details: RawActivity,
}
