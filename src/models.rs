// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the drink endpoints. Every response
//! carries `success: true`; failures use the error bodies from
//! [`crate::error`] and [`crate::auth::error`].
//!
//! The recipe is stored and returned as opaque JSON; this service does not
//! interpret its structure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A drink in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Drink {
    /// Unique identifier, assigned on creation.
    pub id: u64,
    /// Display name; unique across the catalog.
    pub title: String,
    /// Recipe as provided by the client.
    #[schema(value_type = Object)]
    pub recipe: serde_json::Value,
}

/// Request to create a drink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    pub title: String,
    #[schema(value_type = Object)]
    pub recipe: serde_json::Value,
}

/// Request to update a drink. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub recipe: Option<serde_json::Value>,
}

/// Response carrying one or more drinks.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

impl DrinksResponse {
    pub fn new(drinks: Vec<Drink>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// Response to a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    /// Identifier of the removed drink.
    pub delete: u64,
}

/// Plain message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}
