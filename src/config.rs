// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and passed
//! explicitly to the components that need it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH0_DOMAIN` | Identity provider domain (token issuer) | Required |
//! | `API_AUDIENCE` | Expected JWT audience claim | Required |
//! | `AUTH_ALGORITHM` | Token signing algorithm (RSA family only) | `RS256` |
//! | `AUTH_JWKS_URL` | JWKS endpoint override | `https://{AUTH0_DOMAIN}/.well-known/jwks.json` |
//! | `AUTH_JWKS_CACHE_TTL_SECS` | JWKS cache lifetime | `300` |
//! | `AUTH_JWKS_TIMEOUT_SECS` | JWKS request timeout | `10` |
//! | `AUTH_CLOCK_SKEW_LEEWAY_SECS` | Grace period on token expiry | `0` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use thiserror::Error;
use url::Url;

use crate::auth::jwks::{DEFAULT_CACHE_TTL, DEFAULT_FETCH_TIMEOUT};

pub const AUTH0_DOMAIN_ENV: &str = "AUTH0_DOMAIN";
pub const API_AUDIENCE_ENV: &str = "API_AUDIENCE";
pub const AUTH_ALGORITHM_ENV: &str = "AUTH_ALGORITHM";
pub const AUTH_JWKS_URL_ENV: &str = "AUTH_JWKS_URL";
pub const AUTH_JWKS_CACHE_TTL_ENV: &str = "AUTH_JWKS_CACHE_TTL_SECS";
pub const AUTH_JWKS_TIMEOUT_ENV: &str = "AUTH_JWKS_TIMEOUT_SECS";
pub const AUTH_LEEWAY_ENV: &str = "AUTH_CLOCK_SKEW_LEEWAY_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to build JWKS HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Token verification settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSettings {
    /// Identity provider domain, e.g. `tenant.auth0.com`
    pub domain: String,
    /// Expected `aud` claim
    pub audience: String,
    /// The single accepted signing algorithm
    pub algorithm: Algorithm,
    /// Explicit JWKS URL; derived from `domain` when `None`
    pub jwks_url: Option<String>,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
    /// Seconds of tolerance on `exp`
    pub leeway: u64,
}

impl AuthSettings {
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            audience: audience.into(),
            algorithm: Algorithm::RS256,
            jwks_url: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            leeway: 0,
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = lookup(AUTH0_DOMAIN_ENV).ok_or(ConfigError::Missing(AUTH0_DOMAIN_ENV))?;
        let audience = lookup(API_AUDIENCE_ENV).ok_or(ConfigError::Missing(API_AUDIENCE_ENV))?;
        let mut settings = Self::new(domain, audience);

        if let Some(value) = lookup(AUTH_ALGORITHM_ENV) {
            settings.algorithm = parse_rsa_algorithm(&value)?;
        }
        settings.jwks_url = lookup(AUTH_JWKS_URL_ENV);
        if let Some(value) = lookup(AUTH_JWKS_CACHE_TTL_ENV) {
            settings.cache_ttl = Duration::from_secs(parse_secs(AUTH_JWKS_CACHE_TTL_ENV, &value)?);
        }
        if let Some(value) = lookup(AUTH_JWKS_TIMEOUT_ENV) {
            settings.fetch_timeout = Duration::from_secs(parse_secs(AUTH_JWKS_TIMEOUT_ENV, &value)?);
        }
        if let Some(value) = lookup(AUTH_LEEWAY_ENV) {
            settings.leeway = parse_secs(AUTH_LEEWAY_ENV, &value)?;
        }

        // Surface a bad domain or URL at startup rather than on the first request.
        settings.issuer()?;
        settings.resolved_jwks_url()?;
        Ok(settings)
    }

    /// Expected `iss` claim: `https://{domain}/`, with the domain exactly as configured.
    pub fn issuer(&self) -> Result<String, ConfigError> {
        self.domain_url()?;
        Ok(format!("https://{}/", self.domain))
    }

    /// JWKS endpoint, either the explicit override or the well-known path on the domain.
    pub fn resolved_jwks_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.jwks_url {
            return Url::parse(url)
                .map(String::from)
                .map_err(|e| ConfigError::Invalid {
                    name: AUTH_JWKS_URL_ENV,
                    value: url.clone(),
                    reason: e.to_string(),
                });
        }
        self.domain_url()?
            .join(".well-known/jwks.json")
            .map(String::from)
            .map_err(|e| ConfigError::Invalid {
                name: AUTH0_DOMAIN_ENV,
                value: self.domain.clone(),
                reason: e.to_string(),
            })
    }

    fn domain_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            name: AUTH0_DOMAIN_ENV,
            value: self.domain.clone(),
            reason,
        };
        let url = Url::parse(&format!("https://{}/", self.domain)).map_err(|e| invalid(e.to_string()))?;
        if url.path() != "/" || url.query().is_some() {
            return Err(invalid("expected a bare host name".to_string()));
        }
        Ok(url)
    }
}

fn parse_rsa_algorithm(value: &str) -> Result<Algorithm, ConfigError> {
    let algorithm = match value.to_ascii_uppercase().as_str() {
        "RS256" => Algorithm::RS256,
        "RS384" => Algorithm::RS384,
        "RS512" => Algorithm::RS512,
        "PS256" => Algorithm::PS256,
        "PS384" => Algorithm::PS384,
        "PS512" => Algorithm::PS512,
        _ => {
            return Err(ConfigError::Invalid {
                name: AUTH_ALGORITHM_ENV,
                value: value.to_string(),
                reason: "only RSA signature algorithms are supported".to_string(),
            })
        }
    };
    Ok(algorithm)
}

fn parse_secs(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup(PORT_ENV) {
            Some(value) => value.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => 8080,
        };
        let bind_addr = format!("{host}:{port}")
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: HOST_ENV,
                value: host.clone(),
                reason: e.to_string(),
            })?;

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    value: other.to_string(),
                    reason: "expected `json` or `pretty`".to_string(),
                })
            }
        };

        Ok(Self {
            bind_addr,
            log_format,
        })
    }
}
