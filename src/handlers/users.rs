//! User resource endpoints.
//!
//! - `POST /users` - Create a user (201 + `Location`)
//! - `GET /users` - List all users
//! - `GET /users/{id}` - Get one user
//! - `PUT /users/{id}` - Replace name and age (204)
//! - `DELETE /users/{id}` - Delete a user (204)
//!
//! Payloads are validated before the store is touched, so a rejected
//! request never mutates it. A non-integer `{id}` is a 400 with an empty
//! body.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use tracing::{info, instrument};

use crate::error::{AppError, AppResult};
use crate::models::{User, UserId, UserInput};
use crate::state::AppState;

/// Create a new user.
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<Response> {
    let Json(input) = payload?;
    let new_user = input.validate()?;

    let user = state.store.insert(new_user).await?;
    info!(id = user.id, "User created");

    Ok((
        StatusCode::CREATED,
        [(LOCATION, user.location())],
        Json(user),
    )
        .into_response())
}

/// List all users in insertion order.
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.list().await)
}

/// Get a user by id.
#[instrument(skip(state, path))]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> AppResult<Json<User>> {
    let Path(id) = path?;
    state.store.get(id).await.map(Json).ok_or(AppError::NotFound)
}

/// Replace a user's name and age.
#[instrument(skip(state, path, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let new_user = input.validate()?;

    state
        .store
        .update(id, new_user)
        .await
        .ok_or(AppError::NotFound)?;
    info!(id, "User updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user by id.
#[instrument(skip(state, path))]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    state.store.remove(id).await.ok_or(AppError::NotFound)?;
    info!(id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
