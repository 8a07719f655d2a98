// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer tokens and verified token claims.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw credential taken from an `Authorization: Bearer <token>` header.
///
/// Nothing about its contents is trusted until [`TokenVerifier`] has checked
/// it.
///
/// [`TokenVerifier`]: super::TokenVerifier
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// The `aud` claim, which the identity provider emits either as a single
/// string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

/// Claims of a token whose signature, issuer, audience and expiry have all
/// been validated.
///
/// Only the verifier produces these; handlers receive them through the
/// auth guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedClaims {
    /// Issuer (`https://{domain}/`)
    pub iss: String,

    /// Audience
    pub aud: Audience,

    /// Expiration timestamp (seconds since the Unix epoch)
    pub exp: i64,

    /// Subject (identity provider user id)
    #[serde(default)]
    pub sub: Option<String>,

    /// Granted permission scopes, e.g. `post:drinks`
    #[serde(default)]
    pub permissions: Option<Vec<String>>,

    /// Remaining claims, kept verbatim
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl DecodedClaims {
    /// Expiry as a timestamp, `None` if out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}
