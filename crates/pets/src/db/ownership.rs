//! Pet ownership (`user_pet`) repository.
//!
//! A user may own many pets and a pet may have many owners. The composite
//! primary key rejects a second adoption of the same pair.

use sqlx::SqlitePool;

use storeroom_core::{AccountId, PetId};

use super::{Constraint, RepositoryError, violated_constraint};
use super::accounts::AccountRow;
use super::pets::PetRow;
use crate::models::{Account, Pet};

/// Repository for ownership links between users and pets.
pub struct OwnershipRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OwnershipRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record that a user owns a pet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already owns the pet.
    /// Returns `RepositoryError::InvalidReference` if the user or pet doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn adopt(&self, user_id: AccountId, pet_id: PetId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO user_pet (user_id, pet_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(pet_id)
            .execute(self.pool)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some(Constraint::Unique) => {
                    RepositoryError::Conflict("pet already owned by user".to_owned())
                }
                Some(Constraint::ForeignKey) => RepositoryError::InvalidReference(format!(
                    "user {user_id} or pet {pet_id} does not exist"
                )),
                None => RepositoryError::Database(e),
            })?;

        tracing::info!(user_id = %user_id, pet_id = %pet_id, "Pet adopted");
        Ok(())
    }

    /// Remove an ownership link.
    ///
    /// # Returns
    ///
    /// Returns `true` if the link was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn release(&self, user_id: AccountId, pet_id: PetId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM user_pet WHERE user_id = ? AND pet_id = ?")
            .bind(user_id)
            .bind(pet_id)
            .execute(self.pool)
            .await?;

        let released = result.rows_affected() > 0;
        if released {
            tracing::info!(user_id = %user_id, pet_id = %pet_id, "Pet released");
        }
        Ok(released)
    }

    /// Pets owned by a user, by pet ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pets_of(&self, user_id: AccountId) -> Result<Vec<Pet>, RepositoryError> {
        let rows = sqlx::query_as::<_, PetRow>(
            r"
            SELECT p.id, p.name, p.animal
            FROM user_pet up
            JOIN pets p ON p.id = up.pet_id
            WHERE up.user_id = ?
            ORDER BY p.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Pet::from).collect())
    }

    /// Owners of a pet, by user ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn owners_of(&self, pet_id: PetId) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r"
            SELECT u.id, u.name, u.email
            FROM user_pet up
            JOIN user_account u ON u.id = up.user_id
            WHERE up.pet_id = ?
            ORDER BY u.id
            ",
        )
        .bind(pet_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{AccountRepository, PetRepository, create_memory_pool};
    use crate::models::{NewAccount, NewPet};

    async fn account(pool: &SqlitePool, name: &str) -> AccountId {
        AccountRepository::new(pool)
            .create(&NewAccount {
                name: name.to_string(),
                email: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn pet(pool: &SqlitePool, name: &str, animal: &str) -> PetId {
        PetRepository::new(pool)
            .create(&NewPet {
                name: name.to_string(),
                animal: animal.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_adopt_twice_conflicts() {
        let pool = create_memory_pool().await.unwrap();
        let ada = account(&pool, "Ada").await;
        let rex = pet(&pool, "Rex", "dog").await;
        let repo = OwnershipRepository::new(&pool);

        repo.adopt(ada, rex).await.unwrap();
        let err = repo.adopt(ada, rex).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.pets_of(ada).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_adopt_unknown_pet() {
        let pool = create_memory_pool().await.unwrap();
        let ada = account(&pool, "Ada").await;

        let err = OwnershipRepository::new(&pool)
            .adopt(ada, PetId::new(8))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_many_to_many() {
        let pool = create_memory_pool().await.unwrap();
        let ada = account(&pool, "Ada").await;
        let bob = account(&pool, "Bob").await;
        let rex = pet(&pool, "Rex", "dog").await;
        let tom = pet(&pool, "Tom", "cat").await;
        let repo = OwnershipRepository::new(&pool);

        repo.adopt(ada, tom).await.unwrap();
        repo.adopt(ada, rex).await.unwrap();
        repo.adopt(bob, rex).await.unwrap();

        let ada_pets: Vec<PetId> = repo
            .pets_of(ada)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ada_pets, vec![rex, tom]);

        let rex_owners: Vec<AccountId> = repo
            .owners_of(rex)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(rex_owners, vec![ada, bob]);

        assert!(repo.owners_of(PetId::new(99)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_release() {
        let pool = create_memory_pool().await.unwrap();
        let ada = account(&pool, "Ada").await;
        let rex = pet(&pool, "Rex", "dog").await;
        let repo = OwnershipRepository::new(&pool);

        assert!(!repo.release(ada, rex).await.unwrap());
        repo.adopt(ada, rex).await.unwrap();
        assert!(repo.release(ada, rex).await.unwrap());
        assert!(repo.pets_of(ada).await.unwrap().is_empty());
    }
}
