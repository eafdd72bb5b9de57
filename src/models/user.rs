// ABOUTME: User account model, created locally or linked to an external identity provider
// ABOUTME: Provider linkage fields stay nullable for locally created accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use serde::{Deserialize, Serialize};

/// A user account
///
/// Accounts are created either directly (username + password hash) or on
/// first login through an identity provider, in which case the provider
/// linkage fields are populated and `password` stays empty. Everything except
/// the provider linkage is immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Unique username
    pub username: String,
    /// Password hash for locally created accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Identity provider name when externally created (e.g. "google")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// The provider's own id for this user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_user_id: Option<String>,
    /// Email address, when the provider shared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Profile photo URL, when the provider shared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Unique username
    pub username: String,
    /// Password hash for locally created accounts
    pub password: Option<String>,
    /// Identity provider name when externally created
    pub provider: Option<String>,
    /// The provider's own id for this user
    pub provider_user_id: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Profile photo URL
    pub profile_photo_url: Option<String>,
}

impl NewUser {
    /// Payload for a locally created account
    #[must_use]
    pub fn local(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
            provider: None,
            provider_user_id: None,
            email: None,
            profile_photo_url: None,
        }
    }
}
