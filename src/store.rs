// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory drink catalog.

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::models::{CreateDrinkRequest, Drink, UpdateDrinkRequest};

#[derive(Debug, Default)]
pub struct DrinkStore {
    drinks: BTreeMap<u64, Drink>,
    next_id: u64,
}

impl DrinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All drinks, ordered by id.
    pub fn list_drinks(&self) -> Vec<Drink> {
        self.drinks.values().cloned().collect()
    }

    pub fn create_drink(&mut self, request: CreateDrinkRequest) -> Result<Drink, ApiError> {
        let title = validate_title(&request.title)?;
        self.ensure_title_free(title, None)?;

        self.next_id += 1;
        let drink = Drink {
            id: self.next_id,
            title: title.to_string(),
            recipe: request.recipe,
        };
        self.drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    pub fn update_drink(
        &mut self,
        drink_id: u64,
        request: UpdateDrinkRequest,
    ) -> Result<Drink, ApiError> {
        if !self.drinks.contains_key(&drink_id) {
            return Err(ApiError::not_found("Drink not found"));
        }

        let title = match &request.title {
            Some(title) => {
                let title = validate_title(title)?;
                self.ensure_title_free(title, Some(drink_id))?;
                Some(title.to_string())
            }
            None => None,
        };

        let Some(drink) = self.drinks.get_mut(&drink_id) else {
            return Err(ApiError::not_found("Drink not found"));
        };
        if let Some(title) = title {
            drink.title = title;
        }
        if let Some(recipe) = request.recipe {
            drink.recipe = recipe;
        }
        Ok(drink.clone())
    }

    pub fn delete_drink(&mut self, drink_id: u64) -> Result<(), ApiError> {
        if self.drinks.remove(&drink_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Drink not found"))
        }
    }

    fn ensure_title_free(&self, title: &str, except: Option<u64>) -> Result<(), ApiError> {
        let taken = self
            .drinks
            .values()
            .any(|drink| drink.title == title && Some(drink.id) != except);
        if taken {
            Err(ApiError::unprocessable("A drink with this title already exists"))
        } else {
            Ok(())
        }
    }
}

fn validate_title(title: &str) -> Result<&str, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        Err(ApiError::unprocessable("Drink title must not be empty"))
    } else {
        Ok(title)
    }
}
