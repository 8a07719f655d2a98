// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Permission-based access control for the drink API using Auth0 access
//! tokens.
//!
//! ## Auth Flow
//!
//! 1. Client obtains an access token from Auth0 for the `coffeeshop` API
//! 2. Client sends `Authorization: Bearer <JWT>`
//! 3. Server:
//!    - Extracts the token from the header
//!    - Resolves the signing key by `kid` from the tenant's JWKS
//!    - Verifies signature, expiry, issuer and audience
//!    - Checks the `permissions` claim for the scope the route requires
//!
//! ## Security
//!
//! - Exactly one RSA signing algorithm is accepted
//! - A token whose `kid` is not published is rejected; there is no fallback key
//! - JWKS is cached with TTL and refetched when an unknown `kid` appears
//! - No clock skew leeway unless configured

pub mod claims;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testing;

pub use claims::{Audience, BearerToken, DecodedClaims};
pub use error::AuthError;
pub use extractor::{extract_bearer_token, Authorized};
pub use guard::AuthGuard;
pub use jwks::JwksManager;
pub use permissions::{check_permissions, Permission};
pub use verifier::TokenVerifier;
