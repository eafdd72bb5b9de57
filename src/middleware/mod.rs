// ABOUTME: HTTP middleware shared across all route groups
// ABOUTME: Provides CORS policy setup and per-request correlation ids
// Licensed under the Apache License 2.0
// Copyright (c) 2025 Liftlog

pub mod cors;
pub mod request_id;

pub use cors::setup_cors;
pub use request_id::{propagate_request_id, RequestId};
