// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX documents for tests, shared by unit and integration tests.

use geo::Haversine;

/// Latitude step (degrees) that covers `meters` along a meridian.
#[allow(dead_code)]
pub fn lat_step(meters: f64) -> f64 {
    (meters / Haversine.radius()).to_degrees()
}

/// Build a single-segment GPX document heading north from (0, 0).
///
/// Each point is `(meters from previous, elevation, seconds from start)`.
#[allow(dead_code)]
pub fn gpx_document(name: Option<&str>, start: &str, points: &[(f64, f64, i64)]) -> String {
    let start = chrono::DateTime::parse_from_rfc3339(start).expect("valid start time");
    let mut lat = 0.0;
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="ran-tests" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata>
"#,
    );
    if let Some(name) = name {
        out.push_str(&format!("    <name>{}</name>\n", name));
    }
    out.push_str(&format!(
        "    <time>{}</time>\n  </metadata>\n  <trk>\n    <trkseg>\n",
        start.to_rfc3339()
    ));
    for (meters, elevation, seconds) in points {
        lat += lat_step(*meters);
        let time = start + chrono::Duration::seconds(*seconds);
        out.push_str(&format!(
            "      <trkpt lat=\"{:.10}\" lon=\"0.0\"><ele>{}</ele><time>{}</time></trkpt>\n",
            lat,
            elevation,
            time.to_rfc3339()
        ));
    }
    out.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
    out
}
