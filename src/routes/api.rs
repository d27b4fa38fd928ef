// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity API routes.

use crate::display::{self, StatsFormatter};
use crate::error::{AppError, Result};
use crate::models::{Activity, RawActivity, RenderedActivity};
use crate::services::GpxTrack;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Activity routes (public; the server holds a single user's activities).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/token", get(get_token))
        .route("/gpx/{id}", get(get_gpx))
        .route("/gpx/{id}/detail", get(get_activity_detail))
        .route("/gpx/{id}/display", get(get_activity_display))
        .route("/gpx/{id}/geojson", get(get_activity_geojson))
}

// ─── Token ───────────────────────────────────────────────────

/// Map token response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/generated/")
)]
pub struct TokenResponse {
    pub token: String,
}

/// Hand the map token to the UI.
async fn get_token(State(state): State<Arc<AppState>>) -> Result<Json<TokenResponse>> {
    let token = state
        .config
        .mapbox_token
        .clone()
        .ok_or_else(|| AppError::Configuration("MAPBOX_TOKEN not set".to_string()))?;
    Ok(Json(TokenResponse { token }))
}

// ─── Activities ──────────────────────────────────────────────

fn parse_activity_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid activity id {:?}: must be a positive integer",
                raw
            ))
        })
}

async fn load_activity(state: &AppState, raw_id: &str) -> Result<Activity> {
    let id = parse_activity_id(raw_id)?;
    state
        .store
        .get_activity(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
}

/// Raw GPX document.
async fn get_gpx(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let activity = load_activity(&state, &id).await?;
    Ok(([(header::CONTENT_TYPE, "application/gpx+xml")], activity.gpx))
}

/// Raw activity record.
async fn get_activity_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RawActivity>> {
    let activity = load_activity(&state, &id).await?;
    Ok(Json(activity.details))
}

/// Activity formatted for the detail panel and splits table.
async fn get_activity_display(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RenderedActivity>> {
    let activity = load_activity(&state, &id).await?;
    let formatter = StatsFormatter::new(state.config.display_offset);
    let rendered = display::render(&formatter, activity.details)?;

    tracing::debug!(
        activity_id = activity.id,
        splits = rendered.splits.len(),
        "Rendered activity"
    );
    Ok(Json(rendered))
}

/// Track geometry as GeoJSON for the map.
async fn get_activity_geojson(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let activity = load_activity(&state, &id).await?;
    let track = GpxTrack::parse(&activity.gpx)?;
    Ok((
        [(header::CONTENT_TYPE, "application/geo+json")],
        track.to_geojson().to_string(),
    ))
}
