//! Registry user and ownership handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use storeroom_core::{AccountId, Email, PetId};

use super::MessageResponse;
use crate::db::{AccountRepository, OwnershipRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Account, NewAccount, Pet};
use crate::state::AppState;

/// Body of `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<Email>,
}

/// GET /users
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Account>>> {
    Ok(Json(AccountRepository::new(state.pool()).list().await?))
}

/// GET /users/{id}
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
) -> Result<Json<Account>> {
    AccountRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateAccountRequest>,
) -> Result<Json<Account>> {
    let account = AccountRepository::new(state.pool())
        .create(&NewAccount {
            name: req.name,
            email: req.email,
        })
        .await?;
    Ok(Json(account))
}

/// GET /users/{id}/pets
pub async fn pets(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AccountId>,
) -> Result<Json<Vec<Pet>>> {
    Ok(Json(OwnershipRepository::new(state.pool()).pets_of(id).await?))
}

/// Record that a user owns a pet; owning it already is a 400.
///
/// POST /users/{id}/pets/{pet_id}
pub async fn adopt(
    State(state): State<AppState>,
    ApiPath((id, pet_id)): ApiPath<(AccountId, PetId)>,
) -> Result<Json<MessageResponse>> {
    OwnershipRepository::new(state.pool())
        .adopt(id, pet_id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::BadRequest("Pet already owned by user".to_string())
            }
            RepositoryError::InvalidReference(_) => {
                AppError::NotFound("User or pet not found".to_string())
            }
            other => AppError::Database(other),
        })?;

    Ok(Json(MessageResponse::new("Pet adopted")))
}

/// DELETE /users/{id}/pets/{pet_id}
pub async fn release(
    State(state): State<AppState>,
    ApiPath((id, pet_id)): ApiPath<(AccountId, PetId)>,
) -> Result<Json<MessageResponse>> {
    if !OwnershipRepository::new(state.pool())
        .release(id, pet_id)
        .await?
    {
        return Err(AppError::NotFound("Pet not owned by user".to_string()));
    }

    Ok(Json(MessageResponse::new("Pet released")))
}
