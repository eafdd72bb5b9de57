// ABOUTME: Axum HTTP testing utilities for integration tests
// ABOUTME: Builds and executes requests against routers without a live server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog
#![allow(dead_code, clippy::expect_used, clippy::panic)]

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request},
    Router,
};
use serde::Serialize;
use tower::ServiceExt;

/// Builder for requests executed in-process against an axum router
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    extra_headers: Vec<(String, String)>,
    body: Option<String>,
}

impl AxumTestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            extra_headers: Vec::new(),
            body: None,
        }
    }

    /// Create a new GET request
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Create a new POST request
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    /// Create a new PUT request
    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    /// Create a new DELETE request
    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    /// Set a header on the outgoing request
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.extra_headers.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Attach a JSON body, setting the content type alongside it
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("request body should serialize"));
        self.extra_headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Run the request through the router and collect the response
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let builder = self
            .extra_headers
            .into_iter()
            .fold(
                Request::builder().method(self.method).uri(self.uri),
                |builder, (key, value)| builder.header(key, value),
            );

        let request = builder
            .body(Body::from(self.body.unwrap_or_default()))
            .expect("request should build");
        let response = app
            .oneshot(request)
            .await
            .expect("router should accept the request");

        let status = response.status().as_u16();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should buffer");
        AxumTestResponse { status, body }
    }
}

/// Captured response: status plus the fully buffered body
pub struct AxumTestResponse {
    status: u16,
    body: Bytes,
}

impl AxumTestResponse {
    /// The response status code
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Deserialize the body, panicking with the raw payload on mismatch
    /// so failed assertions show what the server actually sent.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Response body is not the expected JSON shape ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    /// The body as text, with invalid UTF-8 replaced
    pub fn text(self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
