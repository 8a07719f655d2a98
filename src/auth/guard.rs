// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The auth guard: extract → verify → enforce, then run the protected operation.

use std::future::Future;

use axum::http::HeaderMap;
use tracing::debug;

use super::extractor::extract_bearer_token;
use super::jwks::JwksManager;
use super::permissions::check_permissions;
use super::verifier::TokenVerifier;
use super::{AuthError, DecodedClaims};
use crate::config::{AuthSettings, ConfigError};

/// Single gate every protected operation goes through.
///
/// Cheap to clone; clones share the JWKS cache.
#[derive(Clone)]
pub struct AuthGuard {
    verifier: TokenVerifier,
}

impl AuthGuard {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Build the JWKS manager and verifier described by `settings`.
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, ConfigError> {
        let jwks = JwksManager::new(settings.resolved_jwks_url()?, settings.fetch_timeout)?
            .with_cache_ttl(settings.cache_ttl);
        let verifier = TokenVerifier::new(
            jwks,
            settings.issuer()?,
            settings.audience.clone(),
            settings.algorithm,
        )
        .with_leeway(settings.leeway);
        Ok(Self::new(verifier))
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Authorize a request for `required`, returning the verified claims.
    ///
    /// Stops at the first failing step.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        required: &str,
    ) -> Result<DecodedClaims, AuthError> {
        let result = async {
            let token = extract_bearer_token(headers)?;
            let claims = self.verifier.verify(&token).await?;
            check_permissions(required, &claims)?;
            Ok::<_, AuthError>(claims)
        }
        .await;

        if let Err(e) = &result {
            debug!(permission = required, error_code = e.error_code(), "request not authorized");
        }
        result
    }

    /// Run `operation` with the verified claims, or return the authorization
    /// failure without running it.
    pub async fn run<F, Fut, T>(
        &self,
        headers: &HeaderMap,
        required: &str,
        operation: F,
    ) -> Result<T, AuthError>
    where
        F: FnOnce(DecodedClaims) -> Fut,
        Fut: Future<Output = T>,
    {
        let claims = self.authorize(headers, required).await?;
        Ok(operation(claims).await)
    }
}
