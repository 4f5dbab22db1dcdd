//! Pet handlers.

use axum::{Json, extract::State};
use serde::Deserialize;

use storeroom_core::PetId;

use crate::db::{OwnershipRepository, PetRepository};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Account, NewPet, Pet};
use crate::state::AppState;

/// Body of `POST /pets`.
#[derive(Debug, Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub animal: String,
}

/// GET /pets
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Pet>>> {
    Ok(Json(PetRepository::new(state.pool()).list().await?))
}

/// GET /pets/{id}
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PetId>,
) -> Result<Json<Pet>> {
    PetRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Pet not found".to_string()))
}

/// POST /pets
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePetRequest>,
) -> Result<Json<Pet>> {
    let pet = PetRepository::new(state.pool())
        .create(&NewPet {
            name: req.name,
            animal: req.animal,
        })
        .await?;
    Ok(Json(pet))
}

/// GET /pets/{id}/owners
pub async fn owners(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PetId>,
) -> Result<Json<Vec<Account>>> {
    Ok(Json(OwnershipRepository::new(state.pool()).owners_of(id).await?))
}
