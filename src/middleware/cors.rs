// ABOUTME: CORS layer construction driven by the configured allowed origins
// ABOUTME: Falls back to a permissive policy when no origins are configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Cross-origin resource sharing policy.
//!
//! Browser clients are served from a different origin than the API during
//! development, so the default policy allows any origin. Deployments that
//! set `CORS_ORIGINS` get an explicit allow-list instead.

use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::Method;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::ServerConfig;

/// Build the CORS layer from the configured allowed origins.
///
/// An empty list or a literal `*` entry yields a wildcard policy. Entries
/// that are not valid header values are skipped with a warning so one typo
/// does not block every configured origin.
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let origins = &config.cors_origins;
    let allow_origin = if origins.is_empty() || origins.iter().any(|entry| entry == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|entry| {
                entry.parse::<HeaderValue>().map_or_else(
                    |_| {
                        warn!("Ignoring invalid CORS origin: {entry}");
                        None
                    },
                    Some,
                )
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::ACCESS_CONTROL_REQUEST_METHOD,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app(config: &ServerConfig) -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(setup_cors(config))
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/ping")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_config_allows_any_origin() {
        let config = ServerConfig::default();
        let response = app(&config)
            .oneshot(preflight("http://anywhere.example"))
            .await
            .unwrap();

        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap();
        assert_eq!(allowed, "*");
    }

    #[tokio::test]
    async fn test_explicit_origins_are_echoed_back() {
        let config = ServerConfig {
            cors_origins: vec!["http://localhost:3000".to_owned()],
            ..ServerConfig::default()
        };
        let response = app(&config)
            .oneshot(preflight("http://localhost:3000"))
            .await
            .unwrap();

        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap();
        assert_eq!(allowed, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_unlisted_origins_are_not_allowed() {
        let config = ServerConfig {
            cors_origins: vec!["http://localhost:3000".to_owned()],
            ..ServerConfig::default()
        };
        let response = app(&config)
            .oneshot(preflight("http://evil.example"))
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
