// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ran: a personal running log.
//!
//! This crate imports GPX recordings into a SQLite store, serves them to a
//! map UI over HTTP, and formats activity statistics and per-kilometer
//! splits for display.

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ActivityStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ActivityStore,
}
