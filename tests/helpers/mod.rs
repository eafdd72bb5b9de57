// ABOUTME: Helper module registry for integration tests
// ABOUTME: Exposes the axum request/response test utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

pub mod axum_test;
