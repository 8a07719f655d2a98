// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token extraction and the Axum extractor for protected handlers.
//!
//! Use `Authorized<P>` in handlers to require a permission:
//!
//! ```rust,ignore
//! async fn create_drink(
//!     Authorized(claims, ..): Authorized<PostDrinks>,
//!     State(state): State<AppState>,
//! ) -> impl IntoResponse {
//!     // claims is DecodedClaims and grants `post:drinks`
//! }
//! ```

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::error::HeaderDefect;
use super::permissions::{check_permissions, Permission};
use super::{AuthError, BearerToken, DecodedClaims};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
///
/// The header must be exactly two whitespace-separated parts, the first of
/// which is `bearer` in any case. The second part is returned as is.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<BearerToken, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
    if value.is_empty() {
        return Err(AuthError::MissingHeader);
    }
    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedHeader(HeaderDefect::Encoding))?;

    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedHeader(HeaderDefect::PartCount));
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader(HeaderDefect::Scheme));
    }

    Ok(BearerToken::new(token))
}

/// Extractor for requests authorized for permission `P`.
///
/// Runs the full auth guard unless `require_permission` middleware already
/// placed verified claims in the request extensions, in which case only the
/// permission check is repeated.
pub struct Authorized<P: Permission>(pub DecodedClaims, pub PhantomData<P>);

impl<P: Permission> Authorized<P> {
    pub fn claims(&self) -> &DecodedClaims {
        &self.0
    }
}

impl<P: Permission> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already verified the token
        if let Some(claims) = parts.extensions.get::<DecodedClaims>() {
            check_permissions(P::SCOPE, claims)?;
            return Ok(Authorized(claims.clone(), PhantomData));
        }

        let claims = state.auth.authorize(&parts.headers, P::SCOPE).await?;
        Ok(Authorized(claims, PhantomData))
    }
}
