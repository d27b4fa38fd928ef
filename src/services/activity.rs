// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity import service.
//!
//! Handles the core workflow:
//! 1. Read the GPX file
//! 2. Parse the track and derive statistics and splits
//! 3. Hash the GPX so re-importing the same file replaces the old record
//! 4. Store the activity in SQLite

use crate::db::ActivityStore;
use crate::error::Result;
use crate::models::NewActivity;
use crate::services::gpx::{GpxError, GpxTrack};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Imports GPX files into the activity store.
#[derive(Clone)]
pub struct ActivityImporter {
    store: ActivityStore,
}

impl ActivityImporter {
    pub fn new(store: ActivityStore) -> Self {
        Self { store }
    }

    /// Import a GPX file from disk.
    pub async fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<ImportResult> {
        let path = path.as_ref();
        tracing::info!(gpx_file = %path.display(), "Importing GPX file");

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            GpxError::IoError(format!("error reading gpx file {}: {}", path.display(), e))
        })?;
        if metadata.is_dir() {
            return Err(GpxError::IoError(format!("{} is a directory", path.display())).into());
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GpxError::IoError(e.to_string()))?;
        self.import_bytes(bytes).await
    }

    /// Import an in-memory GPX document.
    pub async fn import_bytes(&self, gpx: Vec<u8>) -> Result<ImportResult> {
        let track = GpxTrack::parse(&gpx)?;
        let details = track.summarize()?;

        tracing::info!(
            name = %details.name,
            distance_m = details.distance,
            splits = details.splits.len(),
            "Derived activity statistics"
        );

        let activity = NewActivity {
            gpx_hash: gpx_hash(&gpx),
            gpx,
            details,
        };
        let outcome = self.store.insert_activity(&activity).await?;

        Ok(ImportResult {
            id: outcome.id,
            name: activity.details.name,
            replaced: outcome.replaced,
        })
    }
}

/// Result of importing an activity.
#[derive(Debug)]
pub struct ImportResult {
    pub id: i64,
    pub name: String,
    pub replaced: bool,
}

/// Hex-encoded SHA-256 of a GPX document.
pub fn gpx_hash(gpx: &[u8]) -> String {
    hex::encode(Sha256::digest(gpx))
}
