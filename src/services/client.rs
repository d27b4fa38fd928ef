// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for a running `ran api` server.
//!
//! Fetches the map token, raw GPX and activity record, and drives the
//! display pipeline through [`ActivityClient::render_activity`].

use crate::display::{self, FormatError, StatsFormatter};
use crate::models::{RawActivity, RenderedActivity};
use chrono::TimeZone;
use serde::Deserialize;
use std::fmt::Display;

/// Activity shown when no ID is given.
pub const DEFAULT_ACTIVITY_ID: i64 = 1;

/// Client for the activity API.
#[derive(Clone)]
pub struct ActivityClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

impl ActivityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the map access token.
    pub async fn get_token(&self) -> Result<String, ClientError> {
        let url = format!("{}/token", self.base_url);
        let body = self.get_text(&url).await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode {
                url,
                message: e.to_string(),
            })?;
        Ok(token.token)
    }

    /// Fetch the raw GPX document of an activity.
    pub async fn load_gpx(&self, id: Option<i64>) -> Result<String, ClientError> {
        let url = format!(
            "{}/gpx/{}",
            self.base_url,
            id.unwrap_or(DEFAULT_ACTIVITY_ID)
        );
        self.get_text(&url).await
    }

    /// Fetch the raw activity record.
    ///
    /// A response that arrives but does not hold a complete record is a
    /// [`ClientError::Format`], not a retrieval failure.
    pub async fn load_activity(&self, id: Option<i64>) -> Result<RawActivity, ClientError> {
        let url = format!(
            "{}/gpx/{}/detail",
            self.base_url,
            id.unwrap_or(DEFAULT_ACTIVITY_ID)
        );
        let body = self.get_text(&url).await?;
        Ok(display::parse_raw_activity(&body)?)
    }

    /// Fetch an activity and run it through the display pipeline.
    pub async fn render_activity<Tz>(
        &self,
        id: Option<i64>,
        formatter: &StatsFormatter<Tz>,
    ) -> Result<RenderedActivity, ClientError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let id = id.unwrap_or(DEFAULT_ACTIVITY_ID);
        let raw = self.load_activity(Some(id)).await.inspect_err(|e| {
            tracing::error!(activity_id = id, error = %e, "Error getting activity details");
        })?;

        let rendered = display::render(formatter, raw).inspect_err(|e| {
            tracing::error!(activity_id = id, error = %e, "Error formatting activity");
        })?;

        tracing::debug!(
            activity_id = id,
            splits = rendered.splits.len(),
            "Activity loaded"
        );
        Ok(rendered)
    }

    async fn get_text(&self, url: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(url, status = status.as_u16(), body = %body, "Request failed");
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ClientError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Errors from fetching and formatting an activity.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl ClientError {
    /// Whether the data source could not be reached or refused the request.
    pub fn is_retrieval_error(&self) -> bool {
        !matches!(self, ClientError::Format(_))
    }
}
