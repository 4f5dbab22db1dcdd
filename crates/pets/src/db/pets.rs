//! Pet repository.

use sqlx::SqlitePool;

use storeroom_core::PetId;

use super::RepositoryError;
use crate::models::{NewPet, Pet};

#[derive(sqlx::FromRow)]
pub(crate) struct PetRow {
    pub(crate) id: PetId,
    pub(crate) name: String,
    pub(crate) animal: String,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            animal: row.animal,
        }
    }
}

/// Repository for pets.
pub struct PetRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PetRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every pet by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Pet>, RepositoryError> {
        let rows = sqlx::query_as::<_, PetRow>("SELECT id, name, animal FROM pets ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Pet::from).collect())
    }

    /// Get a pet by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PetId) -> Result<Option<Pet>, RepositoryError> {
        let row = sqlx::query_as::<_, PetRow>("SELECT id, name, animal FROM pets WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Pet::from))
    }

    /// Register a pet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_pet: &NewPet) -> Result<Pet, RepositoryError> {
        let row = sqlx::query_as::<_, PetRow>(
            r"
            INSERT INTO pets (name, animal)
            VALUES (?, ?)
            RETURNING id, name, animal
            ",
        )
        .bind(&new_pet.name)
        .bind(&new_pet.animal)
        .fetch_one(self.pool)
        .await?;

        let pet = Pet::from(row);
        tracing::info!(pet_id = %pet.id, animal = %pet.animal, "Pet created");
        Ok(pet)
    }
}
