//! User route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use storeroom_core::{Email, UserId};

use super::{MessageResponse, double_option};
use crate::db::{RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{AddressChange, NewUser, User, UserChanges};
use crate::state::AppState;

const USER_NOT_FOUND: &str = "User not found";

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub address: Option<String>,
}

/// Body of `PUT /users/{id}`.
///
/// `address` is left untouched when the key is absent and cleared when it
/// is `null`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: Email,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
}

fn not_found(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound(USER_NOT_FOUND.to_string()),
        other => AppError::Database(other),
    }
}

/// List all users.
///
/// GET /users
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// Show one user.
///
/// GET /users/{id}
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<User>> {
    UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
}

/// Create a user.
///
/// POST /users
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<Json<User>> {
    let new_user = NewUser {
        name: req.name,
        email: req.email,
        address: req.address,
    };

    let user = UserRepository::new(state.pool()).create(&new_user).await?;
    Ok(Json(user))
}

/// Overwrite a user's name and email, and their address when supplied.
///
/// PUT /users/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<User>> {
    let changes = UserChanges {
        name: req.name,
        email: req.email,
        address: req
            .address
            .map_or(AddressChange::Keep, AddressChange::Replace),
    };

    let user = UserRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(not_found)?;
    Ok(Json(user))
}

/// Delete a user.
///
/// DELETE /users/{id}
pub async fn destroy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<MessageResponse>> {
    if !UserRepository::new(state.pool()).delete(id).await? {
        return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
    }
    Ok(Json(MessageResponse::new("User deleted")))
}
