// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission scopes and enforcement.
//!
//! Tokens carry their grants in a `permissions` claim (Auth0 RBAC). A scope
//! is matched by exact string comparison; there are no wildcards and no
//! hierarchy.

use super::{AuthError, DecodedClaims};

/// A permission scope required by a protected operation.
///
/// Implemented by zero-sized marker types so handlers can state their
/// requirement in their signature, e.g. `Authorized<PostDrinks>`.
pub trait Permission: Send + Sync + 'static {
    const SCOPE: &'static str;
}

macro_rules! permissions {
    ($($(#[$meta:meta])* $name:ident => $scope:literal;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Permission for $name {
                const SCOPE: &'static str = $scope;
            }
        )+
    };
}

permissions! {
    /// View drinks with their full recipe.
    GetDrinksDetail => "get:drinks-detail";
    /// Create drinks.
    PostDrinks => "post:drinks";
    /// Modify drinks.
    PatchDrinks => "patch:drinks";
    /// Remove drinks.
    DeleteDrinks => "delete:drinks";
}

/// Check that `claims` grants `required`.
pub fn check_permissions(required: &str, claims: &DecodedClaims) -> Result<(), AuthError> {
    let granted = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    if granted.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}
