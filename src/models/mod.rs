// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod display;

pub use activity::{Activity, NewActivity, RawActivity, RawSplit};
pub use display::{CreatedAt, DisplayActivity, DisplaySplitRow, RenderedActivity};
