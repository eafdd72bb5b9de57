// ABOUTME: Identity provider capability interface and registry
// ABOUTME: Maps verified external profiles onto local user accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! # Identity Providers
//!
//! Social sign-in support behind a capability interface. Each provider
//! describes its OAuth entry points and builds authorize URLs; actual
//! token exchange happens in an external collaborator, which hands a
//! verified [`ExternalProfile`] back to [`find_or_create_user`].
//!
//! Providers with missing credentials initialize disabled rather than
//! failing startup, so a deployment can run with any subset configured.

pub mod providers;

use crate::config::IdentityConfig;
use crate::database_plugins::DatabaseProvider;
use crate::models::{NewUser, User};
use anyhow::Result;
use tracing::info;

pub use providers::{FacebookProvider, GoogleProvider, InstagramProvider};

/// A social sign-in capability
pub trait IdentityProvider: Send + Sync {
    /// Stable provider key, e.g. `google`
    fn name(&self) -> &'static str;

    /// Human-readable name for login buttons
    fn display_name(&self) -> &'static str;

    /// Load credentials from configuration; returns whether the
    /// provider ends up enabled
    fn initialize(&mut self, config: &IdentityConfig) -> bool;

    /// Whether this provider can take part in sign-in
    fn is_enabled(&self) -> bool;

    /// Authorization URL to send the browser to
    ///
    /// # Errors
    ///
    /// Returns an error when the provider is not configured.
    fn begin_auth(&self, state: &str) -> Result<String>;

    /// Path that starts the sign-in flow
    fn auth_path(&self) -> String {
        format!("/api/auth/{}", self.name())
    }

    /// Path the provider redirects back to
    fn callback_path(&self) -> String {
        format!("/api/auth/{}/callback", self.name())
    }
}

/// Verified profile handed back by a completed sign-in flow
#[derive(Debug, Clone)]
pub struct ExternalProfile {
    /// Provider key
    pub provider: String,
    /// Stable user id within the provider
    pub provider_user_id: String,
    /// Display name, when the provider shares one
    pub display_name: Option<String>,
    /// Email address, when shared
    pub email: Option<String>,
    /// Profile photo URL, when shared
    pub photo_url: Option<String>,
}

/// All known identity providers, keyed by name
pub struct IdentityRegistry {
    providers: Vec<Box<dyn IdentityProvider>>,
}

impl IdentityRegistry {
    /// Build the registry, initializing every known provider from
    /// configuration
    #[must_use]
    pub fn from_config(config: &IdentityConfig) -> Self {
        let mut providers: Vec<Box<dyn IdentityProvider>> = vec![
            Box::new(GoogleProvider::new()),
            Box::new(FacebookProvider::new()),
            Box::new(InstagramProvider::new()),
        ];

        for provider in &mut providers {
            if provider.initialize(config) {
                info!(provider = provider.name(), "Identity provider enabled");
            }
        }

        Self { providers }
    }

    /// Look up a provider by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn IdentityProvider> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(AsRef::as_ref)
    }

    /// Every known provider, enabled or not
    pub fn providers(&self) -> impl Iterator<Item = &dyn IdentityProvider> {
        self.providers.iter().map(AsRef::as_ref)
    }

    /// Providers ready to take part in sign-in
    #[must_use]
    pub fn enabled_providers(&self) -> Vec<&dyn IdentityProvider> {
        self.providers()
            .filter(|p| p.is_enabled())
            .collect()
    }
}

/// Resolve a verified external profile to a local user, creating one
/// on first sign-in
///
/// The username prefers the provider's display name and falls back to
/// `{provider}-{provider_user_id}` when none is shared.
///
/// # Errors
///
/// Returns an error if a storage operation fails, including a username
/// collision on first sign-in.
pub async fn find_or_create_user<D: DatabaseProvider>(
    db: &D,
    profile: &ExternalProfile,
) -> Result<User> {
    if let Some(user) = db
        .get_user_by_provider(&profile.provider, &profile.provider_user_id)
        .await?
    {
        return Ok(user);
    }

    let username = profile
        .display_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("{}-{}", profile.provider, profile.provider_user_id));

    let created = db
        .create_user(&NewUser {
            username,
            password: None,
            provider: Some(profile.provider.clone()),
            provider_user_id: Some(profile.provider_user_id.clone()),
            email: profile.email.clone(),
            profile_photo_url: profile.photo_url.clone(),
        })
        .await?;

    info!(
        user_id = created.id,
        provider = %profile.provider,
        "Created user from external sign-in"
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_plugins::memory::MemoryDatabase;

    fn profile(display_name: Option<&str>) -> ExternalProfile {
        ExternalProfile {
            provider: "google".to_owned(),
            provider_user_id: "g-123".to_owned(),
            display_name: display_name.map(str::to_owned),
            email: Some("lifter@example.com".to_owned()),
            photo_url: None,
        }
    }

    #[test]
    fn test_unconfigured_registry_has_no_enabled_providers() {
        let registry = IdentityRegistry::from_config(&IdentityConfig::default());
        assert_eq!(registry.providers().count(), 3);
        assert!(registry.enabled_providers().is_empty());
        assert!(registry.get("google").is_some());
        assert!(registry.get("github").is_none());
    }

    #[tokio::test]
    async fn test_repeated_sign_in_reuses_the_user() {
        let db = MemoryDatabase::new("memory://").await.unwrap();
        let first = find_or_create_user(&db, &profile(Some("Alice"))).await.unwrap();
        let second = find_or_create_user(&db, &profile(Some("Alice"))).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(db.get_user_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_username_falls_back_to_provider_and_id() {
        let db = MemoryDatabase::new("memory://").await.unwrap();
        let user = find_or_create_user(&db, &profile(None)).await.unwrap();
        assert_eq!(user.username, "google-g-123");
        assert_eq!(user.provider.as_deref(), Some("google"));
    }
}
