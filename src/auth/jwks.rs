// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! ## Behavior
//!
//! - The key set is cached with a configurable TTL
//! - A `kid` missing from the cached set triggers one refetch, so key
//!   rotation at the identity provider is picked up without waiting for the TTL
//! - Refreshes are serialized; callers that waited on a refresh reuse its result
//! - Fetch failures are never retried here and surface as `UnresolvableKey`

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::error::AuthError;

/// Default JWKS cache TTL (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default timeout for the JWKS request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum age of the cached set before an unknown `kid` may force a refetch.
pub const DEFAULT_REFRESH_COOLDOWN: Duration = Duration::from_secs(10);

/// One public key record from the JWKS document.
///
/// Fields are passed through verbatim; only `n` and `e` are interpreted,
/// by the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    /// Key type (`RSA`)
    pub kty: String,
    /// Key ID
    #[serde(default)]
    pub kid: Option<String>,
    /// Intended usage (`sig`)
    #[serde(default, rename = "use")]
    pub usage: String,
    /// RSA modulus, base64url
    #[serde(default)]
    pub n: String,
    /// RSA exponent, base64url
    #[serde(default)]
    pub e: String,
}

/// The `{"keys": [...]}` document served at `/.well-known/jwks.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKeySet {
    pub keys: Vec<JsonWebKey>,
}

impl JsonWebKeySet {
    pub fn find(&self, kid: &str) -> Option<&JsonWebKey> {
        self.keys.iter().find(|key| key.kid.as_deref() == Some(kid))
    }
}

/// Key set together with the time it was fetched.
type Snapshot = (Arc<JsonWebKeySet>, Instant);

/// JWKS cache entry.
struct CacheEntry {
    jwks: Arc<JsonWebKeySet>,
    fetched_at: Instant,
}

/// JWKS manager with caching.
///
/// Clones share the same cache, so one manager serves every request.
#[derive(Clone)]
pub struct JwksManager {
    /// JWKS URL
    jwks_url: String,
    /// Cache TTL
    cache_ttl: Duration,
    /// How fresh a snapshot may be and still be refetched on a `kid` miss
    refresh_cooldown: Duration,
    /// Cached JWKS
    cache: Arc<RwLock<Option<CacheEntry>>>,
    /// Held while a fetch is in flight
    refresh_lock: Arc<Mutex<()>>,
    /// HTTP client
    client: reqwest::Client,
}

impl JwksManager {
    /// Create a new JWKS manager.
    ///
    /// # Arguments
    /// - `jwks_url`: The JWKS endpoint URL (e.g., `https://tenant.auth0.com/.well-known/jwks.json`)
    /// - `timeout`: Upper bound on each fetch; a timeout counts as an unresolvable key
    pub fn new(jwks_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            jwks_url: jwks_url.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            refresh_cooldown: DEFAULT_REFRESH_COOLDOWN,
            cache: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
            client,
        })
    }

    /// Create with custom cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Create with custom refresh cooldown. Zero refetches on every miss.
    pub fn with_refresh_cooldown(mut self, cooldown: Duration) -> Self {
        self.refresh_cooldown = cooldown;
        self
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Look up the key advertised by a token header.
    ///
    /// `Ok(None)` means the key set was retrieved but holds no key with this
    /// `kid`, even after a refetch.
    pub async fn resolve(&self, kid: &str) -> Result<Option<JsonWebKey>, AuthError> {
        let (jwks, fetched_at) = self.get_jwks().await?;
        if let Some(key) = jwks.find(kid) {
            return Ok(Some(key.clone()));
        }

        if fetched_at.elapsed() < self.refresh_cooldown {
            debug!(kid, "kid not in key set, refreshed too recently to refetch");
            return Ok(None);
        }

        debug!(kid, "kid not in cached key set, refetching");
        let (jwks, _) = self.refresh_since(fetched_at).await?;
        Ok(jwks.find(kid).cloned())
    }

    /// Fetch JWKS (with caching).
    async fn get_jwks(&self) -> Result<Snapshot, AuthError> {
        // Check cache first
        let stale_at = {
            let cache = self.cache.read().await;
            match &*cache {
                Some(entry) if entry.fetched_at.elapsed() < self.cache_ttl => {
                    return Ok((entry.jwks.clone(), entry.fetched_at));
                }
                Some(entry) => Some(entry.fetched_at),
                None => None,
            }
        };

        match stale_at {
            Some(fetched_at) => self.refresh_since(fetched_at).await,
            None => self.refresh_empty().await,
        }
    }

    /// Refetch unless another caller already replaced the snapshot taken at `seen`.
    async fn refresh_since(&self, seen: Instant) -> Result<Snapshot, AuthError> {
        let _guard = self.refresh_lock.lock().await;
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at > seen {
                    return Ok((entry.jwks.clone(), entry.fetched_at));
                }
            }
        }
        self.fetch_and_store().await
    }

    /// First population of the cache.
    async fn refresh_empty(&self) -> Result<Snapshot, AuthError> {
        let _guard = self.refresh_lock.lock().await;
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                return Ok((entry.jwks.clone(), entry.fetched_at));
            }
        }
        self.fetch_and_store().await
    }

    /// Callers must hold `refresh_lock`.
    async fn fetch_and_store(&self) -> Result<Snapshot, AuthError> {
        let jwks = Arc::new(self.fetch_jwks().await?);
        let fetched_at = Instant::now();
        let mut cache = self.cache.write().await;
        *cache = Some(CacheEntry {
            jwks: jwks.clone(),
            fetched_at,
        });
        Ok((jwks, fetched_at))
    }

    /// Fetch JWKS from the endpoint.
    async fn fetch_jwks(&self) -> Result<JsonWebKeySet, AuthError> {
        let response = self.client.get(&self.jwks_url).send().await.map_err(|e| {
            warn!(url = %self.jwks_url, error = %e, "JWKS request failed");
            AuthError::UnresolvableKey
        })?;

        if !response.status().is_success() {
            warn!(url = %self.jwks_url, status = %response.status(), "JWKS endpoint returned an error");
            return Err(AuthError::UnresolvableKey);
        }

        let jwks: JsonWebKeySet = response.json().await.map_err(|e| {
            warn!(url = %self.jwks_url, error = %e, "JWKS response is not a key set");
            AuthError::UnresolvableKey
        })?;

        info!(url = %self.jwks_url, keys = jwks.keys.len(), "fetched JWKS");
        Ok(jwks)
    }

    /// Force refresh the JWKS cache.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let _guard = self.refresh_lock.lock().await;
        self.fetch_and_store().await.map(|_| ())
    }

    /// Check if JWKS is currently cached and valid.
    pub async fn is_cached(&self) -> bool {
        let cache = self.cache.read().await;
        if let Some(entry) = &*cache {
            entry.fetched_at.elapsed() < self.cache_ttl
        } else {
            false
        }
    }
}
