// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Reason a `Authorization` header could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDefect {
    /// The value did not split into exactly two whitespace-separated parts.
    PartCount,
    /// The first part was not the `bearer` scheme.
    Scheme,
    /// The value contained bytes that are not visible ASCII.
    Encoding,
}

/// Authorization error type.
///
/// Every failure of the extract → verify → enforce pipeline is one of
/// these variants. Each carries its own HTTP status and message so the
/// HTTP layer never has to inspect the cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingHeader,
    /// Header is not of the form `Bearer <token>`
    MalformedHeader(HeaderDefect),
    /// Token header carries no `kid`
    MissingKeyId,
    /// No key in the JWKS matches the token's `kid`, or the JWKS could not be fetched
    UnresolvableKey,
    /// Token has expired
    TokenExpired,
    /// Audience or issuer did not match
    InvalidClaims,
    /// Signature mismatch or structurally broken token
    MalformedToken,
    /// Verified token has no `permissions` claim
    PermissionsClaimMissing,
    /// `permissions` claim does not grant the required permission
    PermissionDenied,
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    error: u16,
    message: String,
    error_code: &'static str,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "missing_auth_header",
            AuthError::MalformedHeader(_) => "malformed_auth_header",
            AuthError::MissingKeyId => "missing_key_id",
            AuthError::UnresolvableKey => "unresolvable_key",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::MalformedToken => "malformed_token",
            AuthError::PermissionsClaimMissing => "permissions_claim_missing",
            AuthError::PermissionDenied => "permission_denied",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingHeader
            | AuthError::MalformedHeader(_)
            | AuthError::MissingKeyId
            | AuthError::TokenExpired
            | AuthError::InvalidClaims
            | AuthError::PermissionDenied => StatusCode::UNAUTHORIZED,
            AuthError::UnresolvableKey
            | AuthError::MalformedToken
            | AuthError::PermissionsClaimMissing => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingHeader => write!(f, "Authorization header is missing"),
            AuthError::MalformedHeader(HeaderDefect::PartCount) => {
                write!(f, "Invalid header: expected 'Bearer <token>'")
            }
            AuthError::MalformedHeader(HeaderDefect::Scheme) => {
                write!(f, "Invalid header: must start with 'Bearer'")
            }
            AuthError::MalformedHeader(HeaderDefect::Encoding) => {
                write!(f, "Invalid header: value is not valid ASCII")
            }
            AuthError::MissingKeyId => write!(f, "Invalid header: token has no key id"),
            AuthError::UnresolvableKey => write!(f, "Unable to find the signing key for this token"),
            AuthError::TokenExpired => write!(f, "Token expired"),
            AuthError::InvalidClaims => write!(f, "Invalid claims: check the audience and issuer"),
            AuthError::MalformedToken => write!(f, "Unable to decode token"),
            AuthError::PermissionsClaimMissing => write!(f, "Permissions not included in token"),
            AuthError::PermissionDenied => write!(f, "Permission not granted"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
            error_code: self.error_code(),
        });
        (status, body).into_response()
    }
}
