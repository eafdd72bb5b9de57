// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, database selection, and identity provider credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, identity_providers};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostic logging
    Debug,
    /// Full tracing output
    Trace,
}

impl LogLevel {
    /// Parse a level name, falling back to `Info` for anything unknown
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }

    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse an environment name, falling back to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// Process-local in-memory store, lost on shutdown
    Memory,
    /// SQLite database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    SqliteMemory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// `memory://` selects the hash-map store, `sqlite::memory:` an
    /// in-memory SQLite engine, and `sqlite:<path>` a SQLite file. A
    /// bare string is treated as a SQLite file path.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for stricter
    /// URL validation without a signature change.
    pub fn parse_url(s: &str) -> Result<Self> {
        if s == "memory://" || s == "memory" {
            Ok(Self::Memory)
        } else if let Some(path_str) = s.strip_prefix("sqlite:") {
            if path_str == ":memory:" {
                Ok(Self::SqliteMemory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// The connection string understood by the storage factory
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::Memory => "memory://".to_owned(),
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::SqliteMemory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is the hash-map in-memory store
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    /// Check if this is a SQLite database
    #[must_use]
    pub const fn is_sqlite(&self) -> bool {
        matches!(self, Self::SQLite { .. } | Self::SqliteMemory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./liftlog.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Identity provider configurations
    pub identity: IdentityConfig,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL selecting the backend
    pub url: DatabaseUrl,
    /// Run schema migrations on startup
    pub auto_migrate: bool,
    /// Seed the default exercise catalog on startup
    pub auto_seed: bool,
}

/// Identity provider configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Google OAuth configuration
    pub google: IdentityProviderConfig,
    /// Facebook OAuth configuration
    pub facebook: IdentityProviderConfig,
    /// Instagram OAuth configuration
    pub instagram: IdentityProviderConfig,
}

/// Credentials and switches for a single identity provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    /// Provider-issued application id
    pub client_id: Option<String>,
    /// Secret paired with the application id
    pub client_secret: Option<String>,
    /// Callback URL registered with the provider
    pub redirect_uri: Option<String>,
    /// Administrative on/off switch, independent of credentials
    pub enabled: bool,
}

impl IdentityProviderConfig {
    /// Whether the provider has everything it needs to take part in login
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.enabled && self.client_id.is_some() && self.client_secret.is_some()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean environment variable
    /// holds a value that does not parse.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &defaults::HTTP_PORT.to_string())?
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")?),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )?),

            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL)?)
                    .unwrap_or_else(|_| DatabaseUrl::default()),
                auto_migrate: env_var_or("AUTO_MIGRATE", "true")?
                    .parse()
                    .context("Invalid AUTO_MIGRATE value")?,
                auto_seed: env_var_or("AUTO_SEED", "true")?
                    .parse()
                    .context("Invalid AUTO_SEED value")?,
            },

            identity: IdentityConfig {
                google: provider_from_env("GOOGLE")?,
                facebook: provider_from_env("FACEBOOK")?,
                instagram: provider_from_env("INSTAGRAM")?,
            },

            cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")?),
        };

        config.validate();
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Warn about configuration combinations that disable functionality
    pub fn validate(&self) {
        for (name, provider) in self.providers() {
            if provider.enabled && !provider.is_usable() {
                warn!(
                    provider = name,
                    "Identity provider is enabled but missing client_id or client_secret"
                );
            }
        }
    }

    /// Identity provider configurations paired with their registry names
    #[must_use]
    pub fn providers(&self) -> [(&'static str, &IdentityProviderConfig); 3] {
        [
            (identity_providers::GOOGLE, &self.identity.google),
            (identity_providers::FACEBOOK, &self.identity.facebook),
            (identity_providers::INSTAGRAM, &self.identity.instagram),
        ]
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let providers = self
            .providers()
            .iter()
            .map(|(name, provider)| {
                format!(
                    "{}: {}",
                    name,
                    if provider.is_usable() {
                        "enabled"
                    } else {
                        "disabled"
                    }
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Liftlog Server Configuration:\n\
             - HTTP Port: {}\n\
             - Log Level: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Auto Migrate: {}\n\
             - Auto Seed: {}\n\
             - Identity Providers: {}",
            self.http_port,
            self.log_level,
            self.environment,
            self.database.url,
            self.database.auto_migrate,
            self.database.auto_seed,
            providers
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let disabled = IdentityProviderConfig {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            enabled: false,
        };
        Self {
            http_port: defaults::HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
                auto_migrate: true,
                auto_seed: true,
            },
            identity: IdentityConfig {
                google: disabled.clone(),
                facebook: disabled.clone(),
                instagram: disabled,
            },
            cors_origins: vec!["*".to_owned()],
        }
    }
}

/// Read one provider's credentials from `<PREFIX>_CLIENT_ID` and friends
fn provider_from_env(prefix: &str) -> Result<IdentityProviderConfig> {
    Ok(IdentityProviderConfig {
        client_id: env::var(format!("{prefix}_CLIENT_ID")).ok(),
        client_secret: env::var(format!("{prefix}_CLIENT_SECRET")).ok(),
        redirect_uri: env::var(format!("{prefix}_REDIRECT_URI")).ok(),
        enabled: env_var_or(&format!("{prefix}_AUTH_ENABLED"), "true")?
            .parse()
            .with_context(|| format!("Invalid {prefix}_AUTH_ENABLED value"))?,
    })
}

/// Environment variable with a fallback value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}

/// Split a comma-separated origin list, keeping `*` as-is
fn parse_origins(raw: &str) -> Vec<String> {
    if raw.trim() == "*" {
        return vec!["*".to_owned()];
    }
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}
