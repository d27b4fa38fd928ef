// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPX parsing and activity statistics.
//!
//! Derives everything the activity record needs from a GPX track:
//! moving distance and time, elapsed time, ascent/descent, starting
//! elevation, average pace and per-kilometer splits. Also converts the
//! track to GeoJSON for the map.

use crate::models::{RawActivity, RawSplit};
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339};
use chrono::{DateTime, Timelike, Utc};
use geo::{BoundingRect, Distance, Haversine, LineString, MultiLineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use std::io::Cursor;

/// Below this speed an interval counts as stopped.
const STOPPED_SPEED_THRESHOLD_KMH: f64 = 1.0;
/// Length of a full split in meters.
const SPLIT_LENGTH_METERS: f64 = 1000.0;

/// A single track point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    fn position(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance to another point in meters.
    fn distance_to(&self, other: &TrackPoint) -> f64 {
        Haversine.distance(self.position(), other.position())
    }

    /// Seconds elapsed from `earlier` to this point (0 if either has no time).
    fn seconds_since(&self, earlier: Option<DateTime<Utc>>) -> f64 {
        match (earlier, self.time) {
            (Some(start), Some(end)) => (end - start).num_milliseconds() as f64 / 1000.0,
            _ => 0.0,
        }
    }
}

/// A parsed GPX document reduced to what activity statistics need.
#[derive(Debug, Clone)]
pub struct GpxTrack {
    pub name: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub segments: Vec<Vec<TrackPoint>>,
}

/// Moving vs. stopped totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovingData {
    pub moving_time: f64,
    pub moving_distance: f64,
    pub stopped_time: f64,
    pub stopped_distance: f64,
}

impl GpxTrack {
    /// Parse a GPX document.
    pub fn parse(bytes: &[u8]) -> Result<Self, GpxError> {
        let gpx = gpx::read(Cursor::new(bytes)).map_err(|e| GpxError::ParseError(e.to_string()))?;

        let metadata_name = gpx.metadata.as_ref().and_then(|m| m.name.clone());
        let metadata_time = gpx
            .metadata
            .as_ref()
            .and_then(|m| m.time.as_ref())
            .map(parse_gpx_time)
            .transpose()?;

        let mut track_name = None;
        let mut segments = Vec::new();
        for track in gpx.tracks {
            if track_name.is_none() {
                track_name = track.name.clone();
            }
            for segment in track.segments {
                let points = segment
                    .points
                    .iter()
                    .map(|p| {
                        let point = p.point();
                        Ok(TrackPoint {
                            lat: point.y(),
                            lon: point.x(),
                            elevation: p.elevation,
                            time: p.time.as_ref().map(parse_gpx_time).transpose()?,
                        })
                    })
                    .collect::<Result<Vec<_>, GpxError>>()?;
                if !points.is_empty() {
                    segments.push(points);
                }
            }
        }

        if segments.is_empty() {
            return Err(GpxError::NoTrackPoints);
        }

        let name = metadata_name
            .or(track_name)
            .filter(|n| !n.trim().is_empty());

        tracing::debug!(
            segments = segments.len(),
            points = segments.iter().map(Vec::len).sum::<usize>(),
            "Parsed GPX"
        );

        Ok(Self {
            name,
            time: metadata_time,
            segments,
        })
    }

    fn points(&self) -> impl Iterator<Item = &TrackPoint> {
        self.segments.iter().flatten()
    }

    /// Activity start time: metadata time, else the first timed point.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.time.or_else(|| self.points().find_map(|p| p.time))
    }

    /// Moving and stopped totals over all segments.
    pub fn moving_data(&self) -> MovingData {
        let mut data = MovingData::default();
        for segment in &self.segments {
            for pair in segment.windows(2) {
                let distance = pair[0].distance_to(&pair[1]);
                let seconds = pair[1].seconds_since(pair[0].time);
                let speed_kmh = if seconds > 0.0 {
                    (distance / 1000.0) / (seconds / 3600.0)
                } else {
                    0.0
                };

                if speed_kmh <= STOPPED_SPEED_THRESHOLD_KMH {
                    data.stopped_time += seconds;
                    data.stopped_distance += distance;
                } else {
                    data.moving_time += seconds;
                    data.moving_distance += distance;
                }
            }
        }
        data
    }

    /// Elapsed time in seconds, summed per segment from first to last timed point.
    pub fn duration(&self) -> f64 {
        self.segments
            .iter()
            .map(|segment| {
                let first = segment.iter().find_map(|p| p.time);
                let last = segment.iter().rev().find(|p| p.time.is_some());
                last.map_or(0.0, |p| p.seconds_since(first))
            })
            .sum()
    }

    /// Total ascent and descent in meters, from lightly smoothed elevations.
    pub fn uphill_downhill(&self) -> (f64, f64) {
        let elevations: Vec<f64> = self.points().filter_map(|p| p.elevation).collect();
        let smoothed: Vec<f64> = (0..elevations.len())
            .map(|i| {
                if i > 0 && i + 1 < elevations.len() {
                    elevations[i - 1] * 0.3 + elevations[i] * 0.4 + elevations[i + 1] * 0.3
                } else {
                    elevations[i]
                }
            })
            .collect();

        smoothed
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .fold((0.0, 0.0), |(up, down), delta| {
                if delta > 0.0 {
                    (up + delta, down)
                } else {
                    (up, down - delta)
                }
            })
    }

    /// Elevation of the first point that has one.
    pub fn starting_elevation(&self) -> f64 {
        self.points().find_map(|p| p.elevation).unwrap_or(0.0)
    }

    /// Per-kilometer splits.
    ///
    /// Each full split records 1000 m, the time since the previous split and
    /// the elevation where it ended. Any remainder becomes a final partial split.
    pub fn splits(&self) -> Vec<RawSplit> {
        let mut splits = Vec::new();
        let mut total_distance = 0.0;
        let mut split_start = None;
        let mut started = false;

        for segment in &self.segments {
            for pair in segment.windows(2) {
                let (from, to) = (&pair[0], &pair[1]);
                total_distance += from.distance_to(to);
                if !started {
                    split_start = from.time;
                    started = true;
                }

                while total_distance >= SPLIT_LENGTH_METERS {
                    splits.push(RawSplit {
                        distance: SPLIT_LENGTH_METERS,
                        split_time: to.seconds_since(split_start),
                        elevation: to.elevation.unwrap_or(0.0),
                    });
                    split_start = to.time;
                    total_distance -= SPLIT_LENGTH_METERS;
                }
            }
        }

        if total_distance > 0.0 {
            if let Some(last) = self.points().last() {
                splits.push(RawSplit {
                    distance: total_distance,
                    split_time: last.seconds_since(split_start),
                    elevation: last.elevation.unwrap_or(0.0),
                });
            }
        }

        splits
    }

    /// Derive the raw activity record.
    pub fn summarize(&self) -> Result<RawActivity, GpxError> {
        let completed = self.start_time().ok_or(GpxError::MissingTimestamp)?;
        let moving = self.moving_data();
        if moving.moving_distance <= 0.0 {
            return Err(GpxError::NoDistance);
        }

        let distance_km = moving.moving_distance / 1000.0;
        let average_pace = (moving.moving_time / distance_km) / 60.0;
        let (uphill, downhill) = self.uphill_downhill();

        let name = self
            .name
            .clone()
            .unwrap_or_else(|| default_name(completed).to_string());

        Ok(RawActivity {
            name,
            completed_date: format_utc_rfc3339(completed),
            distance: moving.moving_distance,
            uphill,
            downhill,
            time: self.duration(),
            average_pace,
            elevation: self.starting_elevation(),
            splits: self.splits(),
        })
    }

    /// Track geometry as a GeoJSON feature collection, one line per segment.
    pub fn to_geojson(&self) -> GeoJson {
        let lines: Vec<LineString<f64>> = self
            .segments
            .iter()
            .map(|segment| segment.iter().map(|p| (p.lon, p.lat)).collect())
            .collect();

        let bbox = MultiLineString::new(lines.clone())
            .bounding_rect()
            .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

        let features = lines
            .iter()
            .map(|line| {
                let mut properties = serde_json::Map::new();
                if let Some(name) = &self.name {
                    properties.insert("name".to_string(), name.clone().into());
                }
                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geojson::Value::from(line))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        GeoJson::FeatureCollection(FeatureCollection {
            bbox,
            features,
            foreign_members: None,
        })
    }
}

/// Name for an untitled activity, based on the hour it was recorded (UTC).
pub fn default_name(time: DateTime<Utc>) -> &'static str {
    match time.hour() {
        12..=18 => "Afternoon Run",
        19..=23 => "Night Run",
        _ => "Morning Run",
    }
}

fn parse_gpx_time(time: &gpx::Time) -> Result<DateTime<Utc>, GpxError> {
    let iso = time
        .format()
        .map_err(|e| GpxError::ParseError(e.to_string()))?;
    parse_utc_rfc3339(&iso).map_err(|e| GpxError::ParseError(e.to_string()))
}

/// Errors from GPX operations.
#[derive(Debug, thiserror::Error)]
pub enum GpxError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GPX: {0}")]
    ParseError(String),

    #[error("GPX contains no track points")]
    NoTrackPoints,

    #[error("GPX has no timestamps")]
    MissingTimestamp,

    #[error("GPX track covers no moving distance")]
    NoDistance,
}

#[cfg(test)]
#[path = "../../tests/common/gpx_fixture.rs"]
pub(crate) mod test_support;
