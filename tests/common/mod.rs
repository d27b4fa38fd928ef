// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, Response};
use ran::config::Config;
use ran::db::ActivityStore;
use ran::models::{NewActivity, RawActivity, RawSplit};
use ran::routes::create_router;
use ran::services::activity::gpx_hash;
use ran::AppState;
use std::sync::Arc;
use tower::ServiceExt;

mod gpx_fixture;

#[allow(unused_imports)]
pub use gpx_fixture::gpx_document;

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Create a test app with a custom configuration.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let store = ActivityStore::in_memory().expect("Failed to open in-memory store");
    let state = Arc::new(AppState { config, store });
    (create_router(state.clone()), state)
}

/// A 10 km run with two recorded splits.
#[allow(dead_code)]
pub fn scenario_activity() -> RawActivity {
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

/// Store an activity record directly, bypassing GPX parsing.
///
/// The stored GPX is a fixed short run; only `details` varies.
#[allow(dead_code)]
pub async fn seed_activity(state: &AppState, details: RawActivity) -> i64 {
    let gpx = gpx_document(Some(&details.name), "2024-10-19T07:05:00Z", &short_run());
    let activity = NewActivity {
        gpx_hash: gpx_hash(gpx.as_bytes()),
        gpx: gpx.into_bytes(),
        details,
    };
    state
        .store
        .insert_activity(&activity)
        .await
        .expect("Failed to seed activity")
        .id
}

/// 1.5 km north in 250 m steps, 75 s apart, climbing then descending.
#[allow(dead_code)]
pub fn short_run() -> Vec<(f64, f64, i64)> {
    vec![
        (0.0, 100.0, 0),
        (250.0, 104.0, 75),
        (250.0, 108.0, 150),
        (250.0, 112.0, 225),
        (250.0, 110.0, 300),
        (250.0, 106.0, 375),
        (250.0, 103.0, 450),
    ]
}

/// Send a GET request through the router.
#[allow(dead_code)]
pub async fn get(app: axum::Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).expect("response body is UTF-8")
}
