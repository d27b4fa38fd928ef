// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Summary statistics formatting for the activity detail panel.

use super::{
    ensure_finite, ensure_non_negative, minutes_and_seconds, round_meters, validate_split,
    FormatError,
};
use crate::models::{CreatedAt, DisplayActivity, RawActivity};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Long date, e.g. "Sunday, October 19, 2025".
const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";
/// 12-hour clock time, e.g. "7:05 AM".
const CLOCK_TIME_FORMAT: &str = "%-I:%M %p";

/// Formats raw activity statistics into a [`DisplayActivity`].
///
/// Dates are rendered in the formatter's time zone.
#[derive(Debug, Clone)]
pub struct StatsFormatter<Tz: TimeZone> {
    tz: Tz,
}

impl StatsFormatter<Local> {
    /// Formatter using the machine's local time zone.
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl<Tz> StatsFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Format a raw activity.
    ///
    /// Fails without producing output if any field is missing its value,
    /// not finite, or out of range.
    pub fn format(&self, raw: RawActivity) -> Result<DisplayActivity, FormatError> {
        let distance = ensure_non_negative("Distance", raw.distance)?;
        let uphill = ensure_non_negative("Uphill", raw.uphill)?;
        let downhill = ensure_non_negative("Downhill", raw.downhill)?;
        let time = ensure_non_negative("Time", raw.time)?;
        let average_pace = ensure_non_negative("AveragePace", raw.average_pace)?;
        let elevation = ensure_finite("Elevation", raw.elevation)?;
        for split in &raw.splits {
            validate_split(split)?;
        }

        let created = self.format_created(&raw.completed_date)?;

        Ok(DisplayActivity {
            name: raw.name,
            created,
            distance: format_distance(distance),
            uphill: format_meters(uphill),
            downhill: format_meters(downhill),
            duration: format_duration(time),
            average_pace: format_pace(average_pace),
            elevation,
            starting_elevation: format_meters(elevation),
            highest_point: highest_point(elevation, uphill)?,
            splits: raw.splits,
        })
    }

    fn format_created(&self, completed_date: &str) -> Result<CreatedAt, FormatError> {
        let date = DateTime::parse_from_rfc3339(completed_date)
            .map_err(|e| FormatError::InvalidDate {
                value: completed_date.to_string(),
                reason: e.to_string(),
            })?
            .with_timezone(&self.tz);

        Ok(CreatedAt {
            date: date.format(LONG_DATE_FORMAT).to_string(),
            time: date.format(CLOCK_TIME_FORMAT).to_string(),
        })
    }
}

/// Format fractional minutes per kilometer as "M:SS/km".
pub fn format_pace(minutes_per_km: f64) -> String {
    let (minutes, seconds) = minutes_and_seconds(minutes_per_km);
    format!("{}:{:02}/km", minutes, seconds)
}

/// Format seconds as "HH:MM:SS", dropping fractional seconds.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.trunc() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format meters as kilometers with two decimals, e.g. "10.00km".
pub fn format_distance(meters: f64) -> String {
    format!("{:.2}km", meters / 1000.0)
}

/// Format meters rounded to the nearest meter, e.g. "150m".
pub fn format_meters(meters: f64) -> String {
    format!("{}m", round_meters(meters))
}

/// Highest point reached: starting elevation plus total ascent.
///
/// Both values are rounded before they are added. Fails if the sum does
/// not fit in whole meters.
pub fn highest_point(elevation: f64, uphill: f64) -> Result<i64, FormatError> {
    round_meters(elevation)
        .checked_add(round_meters(uphill))
        .ok_or(FormatError::OutOfRange {
            field: "HighestPoint",
            value: elevation + uphill,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawSplit;
    use chrono::{FixedOffset, Utc};

    fn make_raw() -> RawActivity {
        RawActivity {
            name: "Morning Run".to_string(),
            completed_date: "2024-10-19T07:05:00Z".to_string(),
            distance: 10000.0,
            uphill: 150.4,
            downhill: 140.6,
            time: 3725.0,
            average_pace: 5.5,
            elevation: 100.0,
            splits: vec![
                RawSplit {
                    distance: 1000.0,
                    split_time: 330.0,
                    elevation: 105.0,
                },
                RawSplit {
                    distance: 2000.0,
                    split_time: 345.0,
                    elevation: 98.0,
                },
            ],
        }
    }

    #[test]
    fn test_format_basic_activity() {
        let display = StatsFormatter::new(Utc).format(make_raw()).unwrap();

        assert_eq!(display.name, "Morning Run");
        assert_eq!(display.distance, "10.00km");
        assert_eq!(display.uphill, "150m");
        assert_eq!(display.downhill, "141m");
        assert_eq!(display.duration, "01:02:05");
        assert_eq!(display.average_pace, "5:30/km");
        assert_eq!(display.elevation, 100.0);
        assert_eq!(display.starting_elevation, "100m");
        assert_eq!(display.splits.len(), 2);
    }

    #[test]
    fn test_format_created_date_and_time() {
        let display = StatsFormatter::new(Utc).format(make_raw()).unwrap();
        assert_eq!(display.created.date, "Saturday, October 19, 2024");
        assert_eq!(display.created.time, "7:05 AM");
    }

    #[test]
    fn test_format_created_in_other_time_zone() {
        // UTC-7: 07:05Z is 00:05 the same day
        let tz = FixedOffset::west_opt(7 * 3600).unwrap();
        let display = StatsFormatter::new(tz).format(make_raw()).unwrap();
        assert_eq!(display.created.date, "Saturday, October 19, 2024");
        assert_eq!(display.created.time, "12:05 AM");

        let mut raw = make_raw();
        raw.completed_date = "2024-10-19T18:30:00+00:00".to_string();
        let display = StatsFormatter::new(Utc).format(raw).unwrap();
        assert_eq!(display.created.time, "6:30 PM");
    }

    #[test]
    fn test_highest_point_rounds_before_adding() {
        // 100.4 + 150.4 = 250.8 would round to 251; rounding first gives 250
        let mut raw = make_raw();
        raw.elevation = 100.4;
        let display = StatsFormatter::new(Utc).format(raw).unwrap();
        assert_eq!(display.highest_point, 250);
        assert_eq!(highest_point(100.5, 150.5).unwrap(), 101 + 151);
    }

    #[test]
    fn test_huge_highest_point_is_out_of_range() {
        let mut raw = make_raw();
        raw.elevation = 1e300;
        raw.uphill = 1e300;

        let err = StatsFormatter::new(Utc).format(raw).unwrap_err();

        assert!(matches!(
            err,
            FormatError::OutOfRange {
                field: "HighestPoint",
                ..
            }
        ));
    }

    #[test]
    fn test_format_pace_values() {
        assert_eq!(format_pace(5.5), "5:30/km");
        assert_eq!(format_pace(6.0), "6:00/km");
        assert_eq!(format_pace(4.25), "4:15/km");
        assert_eq!(format_pace(4.999), "5:00/km");
    }

    #[test]
    fn test_format_pace_seconds_always_in_range() {
        let mut v = 0.0;
        while v < 20.0 {
            let pace = format_pace(v);
            let (minutes, rest) = pace.split_once(':').unwrap();
            assert!(minutes.parse::<u64>().is_ok(), "bad minutes in {}", pace);
            let seconds: u64 = rest.strip_suffix("/km").unwrap().parse().unwrap();
            assert!(seconds <= 59, "seconds out of range in {}", pace);
            assert_eq!(rest.len(), "SS/km".len());
            v += 0.0037;
        }
    }

    #[test]
    fn test_format_duration_values() {
        assert_eq!(format_duration(3725.0), "01:02:05");
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.999), "00:00:59");
        assert_eq!(format_duration(36000.0), "10:00:00");
    }

    #[test]
    fn test_format_duration_round_trips_components() {
        for total in [0u64, 1, 59, 60, 61, 3599, 3600, 3725, 86399, 90061] {
            let formatted = format_duration(total as f64);
            let parts: Vec<u64> = formatted.split(':').map(|p| p.parse().unwrap()).collect();
            assert_eq!(parts[0] * 3600 + parts[1] * 60 + parts[2], total);
        }
    }

    #[test]
    fn test_format_distance_values() {
        assert_eq!(format_distance(10000.0), "10.00km");
        assert_eq!(format_distance(870.0), "0.87km");
        assert_eq!(format_distance(0.0), "0.00km");
    }

    #[test]
    fn test_format_rejects_invalid_date() {
        let mut raw = make_raw();
        raw.completed_date = "yesterday".to_string();
        let err = StatsFormatter::new(Utc).format(raw).unwrap_err();
        assert!(matches!(err, FormatError::InvalidDate { .. }));
    }

    #[test]
    fn test_format_rejects_non_finite_values() {
        let mut raw = make_raw();
        raw.average_pace = f64::NAN;
        let err = StatsFormatter::new(Utc).format(raw).unwrap_err();
        assert_eq!(
            err,
            FormatError::NonFinite {
                field: "AveragePace"
            }
        );

        let mut raw = make_raw();
        raw.splits[1].elevation = f64::INFINITY;
        let err = StatsFormatter::new(Utc).format(raw).unwrap_err();
        assert_eq!(
            err,
            FormatError::NonFinite {
                field: "Splits.Elevation"
            }
        );
    }

    #[test]
    fn test_format_rejects_negative_time() {
        let mut raw = make_raw();
        raw.time = -5.0;
        let err = StatsFormatter::new(Utc).format(raw).unwrap_err();
        assert!(matches!(err, FormatError::Negative { field: "Time", .. }));
    }
}
