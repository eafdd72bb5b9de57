// ABOUTME: Concrete identity providers for Google, Facebook, and Instagram sign-in
// ABOUTME: Each holds its OAuth endpoint constants and builds authorize URLs from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

use super::IdentityProvider;
use crate::config::{IdentityConfig, IdentityProviderConfig};
use crate::constants::identity_providers;
use anyhow::{anyhow, Result};
use url::Url;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_SCOPES: &str = "openid email profile";

const FACEBOOK_AUTH_URL: &str = "https://www.facebook.com/v18.0/dialog/oauth";
const FACEBOOK_SCOPES: &str = "email,public_profile";

const INSTAGRAM_AUTH_URL: &str = "https://api.instagram.com/oauth/authorize";
const INSTAGRAM_SCOPES: &str = "user_profile,user_media";

/// Standard authorization-code URL shared by all three providers
fn build_authorize_url(
    endpoint: &str,
    scope: &str,
    config: Option<&IdentityProviderConfig>,
    fallback_redirect: &str,
    display: &str,
    state: &str,
) -> Result<String> {
    let cfg = config.ok_or_else(|| anyhow!("{display} sign-in is not configured"))?;
    let client_id = cfg
        .client_id
        .as_deref()
        .ok_or_else(|| anyhow!("{display} sign-in is missing a client id"))?;
    // A relative redirect resolves against the serving host, matching
    // single-host deployments that sit behind one origin.
    let redirect = cfg.redirect_uri.as_deref().unwrap_or(fallback_redirect);

    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect)
        .append_pair("response_type", "code")
        .append_pair("scope", scope)
        .append_pair("state", state);
    Ok(url.to_string())
}

/// Google sign-in
#[derive(Default)]
pub struct GoogleProvider {
    config: Option<IdentityProviderConfig>,
}

impl GoogleProvider {
    /// Create an uninitialized provider
    #[must_use]
    pub const fn new() -> Self {
        Self { config: None }
    }
}

impl IdentityProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        identity_providers::GOOGLE
    }

    fn display_name(&self) -> &'static str {
        "Google"
    }

    fn initialize(&mut self, config: &IdentityConfig) -> bool {
        self.config = config.google.is_usable().then(|| config.google.clone());
        self.config.is_some()
    }

    fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    fn begin_auth(&self, state: &str) -> Result<String> {
        build_authorize_url(
            GOOGLE_AUTH_URL,
            GOOGLE_SCOPES,
            self.config.as_ref(),
            &self.callback_path(),
            self.display_name(),
            state,
        )
    }
}

/// Facebook sign-in
#[derive(Default)]
pub struct FacebookProvider {
    config: Option<IdentityProviderConfig>,
}

impl FacebookProvider {
    /// Create an uninitialized provider
    #[must_use]
    pub const fn new() -> Self {
        Self { config: None }
    }
}

impl IdentityProvider for FacebookProvider {
    fn name(&self) -> &'static str {
        identity_providers::FACEBOOK
    }

    fn display_name(&self) -> &'static str {
        "Facebook"
    }

    fn initialize(&mut self, config: &IdentityConfig) -> bool {
        self.config = config.facebook.is_usable().then(|| config.facebook.clone());
        self.config.is_some()
    }

    fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    fn begin_auth(&self, state: &str) -> Result<String> {
        build_authorize_url(
            FACEBOOK_AUTH_URL,
            FACEBOOK_SCOPES,
            self.config.as_ref(),
            &self.callback_path(),
            self.display_name(),
            state,
        )
    }
}

/// Instagram sign-in
#[derive(Default)]
pub struct InstagramProvider {
    config: Option<IdentityProviderConfig>,
}

impl InstagramProvider {
    /// Create an uninitialized provider
    #[must_use]
    pub const fn new() -> Self {
        Self { config: None }
    }
}

impl IdentityProvider for InstagramProvider {
    fn name(&self) -> &'static str {
        identity_providers::INSTAGRAM
    }

    fn display_name(&self) -> &'static str {
        "Instagram"
    }

    fn initialize(&mut self, config: &IdentityConfig) -> bool {
        self.config = config
            .instagram
            .is_usable()
            .then(|| config.instagram.clone());
        self.config.is_some()
    }

    fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    fn begin_auth(&self, state: &str) -> Result<String> {
        build_authorize_url(
            INSTAGRAM_AUTH_URL,
            INSTAGRAM_SCOPES,
            self.config.as_ref(),
            &self.callback_path(),
            self.display_name(),
            state,
        )
    }
}
