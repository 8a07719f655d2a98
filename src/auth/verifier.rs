// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT signature and claim verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tracing::debug;

use super::jwks::JwksManager;
use super::{AuthError, BearerToken, DecodedClaims};

/// Verifies bearer tokens against the identity provider's published keys.
#[derive(Clone)]
pub struct TokenVerifier {
    jwks: JwksManager,
    issuer: String,
    audience: String,
    algorithm: Algorithm,
    leeway: u64,
}

impl TokenVerifier {
    /// # Arguments
    /// - `issuer`: Exact expected `iss`, e.g. `https://tenant.auth0.com/`
    /// - `audience`: Value that must appear in `aud`
    /// - `algorithm`: The only accepted signing algorithm
    pub fn new(
        jwks: JwksManager,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            jwks,
            issuer: issuer.into(),
            audience: audience.into(),
            algorithm,
            leeway: 0,
        }
    }

    /// Tolerate `exp` this many seconds in the past.
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn jwks(&self) -> &JwksManager {
        &self.jwks
    }

    /// Verify `token` and return its claims.
    pub async fn verify(&self, token: &BearerToken) -> Result<DecodedClaims, AuthError> {
        let header = decode_header(token.as_str()).map_err(|e| {
            debug!(error = %e, "token header is not decodable");
            AuthError::MalformedToken
        })?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let jwk = self
            .jwks
            .resolve(&kid)
            .await?
            .ok_or_else(|| {
                debug!(%kid, "no signing key with this kid");
                AuthError::UnresolvableKey
            })?;

        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|e| {
            debug!(%kid, error = %e, "signing key is not a usable RSA key");
            AuthError::MalformedToken
        })?;

        let token_data = decode::<DecodedClaims>(token.as_str(), &decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::ImmatureSignature
                | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
                _ => {
                    debug!(%kid, error = %e, "token failed verification");
                    AuthError::MalformedToken
                }
            })?;

        Ok(token_data.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation
    }
}
