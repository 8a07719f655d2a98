// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization middleware for Axum.
//!
//! An alternative to the `Authorized<P>` extractor for guarding a whole
//! route or router subtree:
//!
//! ```rust,ignore
//! let admin = Router::new()
//!     .route("/drinks/{id}", delete(drinks::delete_drink))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         require_permission::<DeleteDrinks>,
//!     ));
//! ```
//!
//! On success the verified `DecodedClaims` are stored in the request
//! extensions, where `Authorized<P>` picks them up without verifying the
//! token a second time.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::permissions::Permission;
use crate::state::AppState;

/// Authorize the request for `P` before handing it to the inner service.
pub async fn require_permission<P: Permission>(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.auth.authorize(request.headers(), P::SCOPE).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
