// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Content policy for the map UI: own scripts plus the map library, its
/// tiles and its web workers.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' https://api.mapbox.com; \
     style-src 'self' 'unsafe-inline' https://api.mapbox.com; \
     img-src 'self' data: blob: https://*.mapbox.com; \
     connect-src 'self' https://*.mapbox.com https://events.mapbox.com; \
     worker-src blob:; \
     frame-ancestors 'none'";

const SECURITY_HEADERS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", CONTENT_SECURITY_POLICY),
];

/// Add security headers to every response, API and static UI alike.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}
