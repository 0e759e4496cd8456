// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `API_KEY` | Tatum API key, forwarded as `x-api-key` | empty |
//! | `TATUM_API_BASE_URL` | Tatum API base URL | `https://api.tatum.io` |
//! | `QUERY_TIMEOUT_SECS` | Deadline per upstream call (`0` disables) | `30` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::providers::tatum::DEFAULT_API_BASE_URL;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable holding the Tatum API key.
///
/// The key is opaque to this service. When it is missing, requests are still
/// forwarded and the upstream answers `401`.
pub const API_KEY_ENV: &str = "API_KEY";

pub const TATUM_API_BASE_URL_ENV: &str = "TATUM_API_BASE_URL";
pub const QUERY_TIMEOUT_SECS_ENV: &str = "QUERY_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(LOG_FORMAT_ENV).as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub tatum_base_url: Url,
    /// `None` disables the per-call deadline.
    pub query_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("tatum_base_url", &self.tatum_base_url.as_str())
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build from an arbitrary variable source.
    ///
    /// Malformed numeric values fall back to their defaults with a warning;
    /// a malformed base URL is fatal.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or_default(&lookup, PORT_ENV, DEFAULT_PORT);
        let api_key = lookup(API_KEY_ENV).unwrap_or_default();

        let raw_base_url =
            lookup(TATUM_API_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let tatum_base_url = Url::parse(&raw_base_url).map_err(|e| ConfigError::Invalid {
            name: TATUM_API_BASE_URL_ENV,
            reason: format!("{raw_base_url}: {e}"),
        })?;
        if !matches!(tatum_base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: TATUM_API_BASE_URL_ENV,
                reason: format!("unsupported scheme `{}`", tatum_base_url.scheme()),
            });
        }

        let timeout_secs =
            parse_or_default(&lookup, QUERY_TIMEOUT_SECS_ENV, DEFAULT_QUERY_TIMEOUT_SECS);
        let query_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            host,
            port,
            api_key,
            tatum_base_url,
            query_timeout,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Environment lookup treating blank values as unset.
fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, %default, "Invalid value, using default");
            default
        }),
    }
}
