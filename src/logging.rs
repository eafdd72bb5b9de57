// ABOUTME: Tracing subscriber setup shared by the server binary
// ABOUTME: Maps deployment settings onto stdout log layers and dependency noise filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! Structured logging built on `tracing`

use crate::config::{Environment, LogLevel};
use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Per-dependency level overrides applied on top of the base filter.
///
/// Request-level noise from the HTTP and database stacks drowns out
/// application logs at `debug`, so those crates are pinned down even
/// when `RUST_LOG` opens the base level up.
const DEPENDENCY_DIRECTIVES: &[&str] = &[
    "hyper=warn",
    "hyper::proto=warn",
    "sqlx=warn",
    "tower_http=info",
];

/// How log lines are rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers
    Json,
    /// Multi-line human-readable output
    Pretty,
    /// Single-line human-readable output
    Compact,
}

impl LogFormat {
    /// Resolve the output format for a deployment environment, honoring
    /// an explicit `LOG_FORMAT` override when one is set.
    fn resolve(override_name: Option<&str>, environment: &Environment) -> Self {
        match override_name {
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            Some("compact") => Self::Compact,
            _ if environment.is_production() => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Subscriber configuration derived from the deployment environment
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base severity for application logs
    pub level: LogLevel,
    /// Output rendering
    pub format: LogFormat,
    /// Deployment environment, reported in the startup event
    pub environment: Environment,
    /// Annotate events with source file, line number, and thread id
    pub verbose_sources: bool,
    /// Emit span open and close events in addition to log events
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            environment: Environment::Development,
            verbose_sources: false,
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Build from `LOG_LEVEL`, `LOG_FORMAT`, and `ENVIRONMENT`.
    ///
    /// Production defaults to JSON output with source annotations so
    /// shipped logs stay machine-parseable; development stays pretty.
    /// `LOG_VERBOSE` forces source annotations in any environment.
    #[must_use]
    pub fn from_env() -> Self {
        let level = LogLevel::from_str_or_default(&env::var("LOG_LEVEL").unwrap_or_default());
        let environment =
            Environment::from_str_or_default(&env::var("ENVIRONMENT").unwrap_or_default());
        let format = LogFormat::resolve(env::var("LOG_FORMAT").ok().as_deref(), &environment);
        let verbose = environment.is_production() || env::var("LOG_VERBOSE").is_ok();

        Self {
            level,
            format,
            environment,
            verbose_sources: verbose,
            span_events: verbose,
        }
    }

    /// Build the event filter: `RUST_LOG` wins when set, otherwise the
    /// configured level applies, and the dependency overrides are
    /// stacked on top either way.
    fn build_filter(&self) -> EnvFilter {
        let mut filter = env::var("RUST_LOG")
            .map_or_else(|_| EnvFilter::new(self.level.to_string()), EnvFilter::new);

        for directive in DEPENDENCY_DIRECTIVES {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
        if let Ok(app) = format!("liftlog_server={}", self.level).parse() {
            filter = filter.add_directive(app);
        }
        filter
    }

    /// Install the global tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if a subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.build_filter());
        let span_events = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        // Each fmt layer builder is a distinct type, so the subscriber
        // is installed inside the match rather than assembled after it.
        match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.verbose_sources)
                        .with_line_number(self.verbose_sources)
                        .with_thread_ids(self.verbose_sources)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events)
                        .json(),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.verbose_sources)
                        .with_line_number(self.verbose_sources)
                        .with_thread_ids(self.verbose_sources)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init()?,
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init()?,
        }

        info!(
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            level = %self.level,
            format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging from environment variables
///
/// # Errors
///
/// Returns an error if a subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Initialize logging with development defaults
///
/// # Errors
///
/// Returns an error if a subscriber is already installed
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_development_pretty() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.verbose_sources);
        assert!(!config.span_events);
    }

    #[test]
    fn test_format_resolution_prefers_explicit_override() {
        assert_eq!(
            LogFormat::resolve(Some("compact"), &Environment::Production),
            LogFormat::Compact
        );
        assert_eq!(
            LogFormat::resolve(None, &Environment::Production),
            LogFormat::Json
        );
        assert_eq!(
            LogFormat::resolve(None, &Environment::Development),
            LogFormat::Pretty
        );
        assert_eq!(
            LogFormat::resolve(Some("yaml"), &Environment::Development),
            LogFormat::Pretty
        );
    }

    #[test]
    fn test_dependency_directives_parse() {
        for directive in DEPENDENCY_DIRECTIVES {
            assert!(directive
                .parse::<tracing_subscriber::filter::Directive>()
                .is_ok());
        }
    }
}
