// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text layout of the detail card and splits table.

use crate::models::RenderedActivity;
use std::fmt::Write;

const LABEL_WIDTH: usize = 20;

/// Render a formatted activity as a terminal-friendly panel.
pub fn render_text(rendered: &RenderedActivity) -> String {
    let activity = &rendered.activity;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "{} on {}",
        activity.created.time, activity.created.date
    );
    let _ = writeln!(out, "{}", activity.name);
    let _ = writeln!(out);

    let details = [
        ("Distance", activity.distance.clone()),
        ("Elapsed Time", activity.duration.clone()),
        ("Average Pace", activity.average_pace.clone()),
        ("Elevation Gain", activity.uphill.clone()),
        ("Elevation Loss", activity.downhill.clone()),
        ("Starting Elevation", activity.starting_elevation.clone()),
        ("Highest Point", format!("{}m", activity.highest_point)),
    ];
    for (label, value) in details {
        let _ = writeln!(out, "  {:<width$}{}", label, value, width = LABEL_WIDTH);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Splits");
    let _ = writeln!(out, "  {:<8}{:<12}{}", "KM", "Pace", "Elev");
    for row in &rendered.splits {
        let _ = writeln!(out, "  {:<8}{:<12}{}", row.km, row.pace, row.elevation);
    }

    out
}
