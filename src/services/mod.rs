// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod client;
pub mod gpx;

pub use activity::{ActivityImporter, ImportResult};
pub use client::{ActivityClient, ClientError};
pub use gpx::{GpxError, GpxTrack};
