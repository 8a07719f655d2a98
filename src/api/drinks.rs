// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drink catalog endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use tracing::{debug, info};

use crate::{
    auth::{
        permissions::{DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks},
        Authorized,
    },
    error::ApiError,
    models::{CreateDrinkRequest, DeleteDrinkResponse, DrinksResponse, UpdateDrinkRequest},
    state::AppState,
};

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::unprocessable(e.body_text()))
}

fn drink_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("resource not found"))
}

#[utoipa::path(
    get,
    path = "/drinks",
    tag = "Drinks",
    responses((status = 200, body = DrinksResponse))
)]
pub async fn list_drinks(State(state): State<AppState>) -> Json<DrinksResponse> {
    let store = state.store.read().await;
    Json(DrinksResponse::new(store.list_drinks()))
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "Drinks",
    security(("bearer" = ["get:drinks-detail"])),
    responses(
        (status = 200, body = DrinksResponse),
        (status = 401, description = "Missing, invalid or insufficient token"),
    )
)]
pub async fn list_drinks_detail(
    auth: Authorized<GetDrinksDetail>,
    State(state): State<AppState>,
) -> Json<DrinksResponse> {
    debug!(sub = ?auth.claims().sub, "detailed drink listing");
    let store = state.store.read().await;
    Json(DrinksResponse::new(store.list_drinks()))
}

#[utoipa::path(
    post,
    path = "/drinks",
    request_body = CreateDrinkRequest,
    tag = "Drinks",
    security(("bearer" = ["post:drinks"])),
    responses(
        (status = 200, body = DrinksResponse),
        (status = 401, description = "Missing, invalid or insufficient token"),
        (status = 422, description = "Invalid body or duplicate title"),
    )
)]
pub async fn create_drink(
    Authorized(claims, _): Authorized<PostDrinks>,
    State(state): State<AppState>,
    body: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let request = json_body(body)?;
    let drink = state.store.write().await.create_drink(request)?;
    info!(drink_id = drink.id, sub = ?claims.sub, "drink created");
    Ok(Json(DrinksResponse::new(vec![drink])))
}

#[utoipa::path(
    patch,
    path = "/drinks/{drink_id}",
    params(("drink_id" = u64, Path, description = "Identifier of the drink to update")),
    request_body = UpdateDrinkRequest,
    tag = "Drinks",
    security(("bearer" = ["patch:drinks"])),
    responses(
        (status = 200, body = DrinksResponse),
        (status = 401, description = "Missing, invalid or insufficient token"),
        (status = 404, description = "Drink not found"),
        (status = 422, description = "Invalid body or duplicate title"),
    )
)]
pub async fn update_drink(
    Authorized(claims, _): Authorized<PatchDrinks>,
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let drink_id = drink_id(path)?;
    let request = json_body(body)?;
    let drink = state.store.write().await.update_drink(drink_id, request)?;
    info!(drink_id, sub = ?claims.sub, "drink updated");
    Ok(Json(DrinksResponse::new(vec![drink])))
}

#[utoipa::path(
    delete,
    path = "/drinks/{drink_id}",
    params(("drink_id" = u64, Path, description = "Identifier of the drink to delete")),
    tag = "Drinks",
    security(("bearer" = ["delete:drinks"])),
    responses(
        (status = 200, body = DeleteDrinkResponse),
        (status = 401, description = "Missing, invalid or insufficient token"),
        (status = 404, description = "Drink not found"),
    )
)]
pub async fn delete_drink(
    Authorized(claims, _): Authorized<DeleteDrinks>,
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeleteDrinkResponse>, ApiError> {
    let drink_id = drink_id(path)?;
    state.store.write().await.delete_drink(drink_id)?;
    info!(drink_id, sub = ?claims.sub, "drink deleted");
    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: drink_id,
    }))
}
