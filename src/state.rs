// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::AuthGuard;
use crate::store::DrinkStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DrinkStore>>,
    pub auth: AuthGuard,
}

impl AppState {
    pub fn new(store: DrinkStore, auth: AuthGuard) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth,
        }
    }
}
