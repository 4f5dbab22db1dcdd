//! Registry user repository.

use sqlx::SqlitePool;

use storeroom_core::{AccountId, Email};

use super::RepositoryError;
use crate::models::{Account, NewAccount};

#[derive(sqlx::FromRow)]
pub(crate) struct AccountRow {
    pub(crate) id: AccountId,
    pub(crate) name: String,
    pub(crate) email: Option<String>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = row
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email for user {}: {e}", row.id))
            })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
        })
    }
}

/// Repository for registry users.
pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email FROM user_account ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email FROM user_account WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r"
            INSERT INTO user_account (name, email)
            VALUES (?, ?)
            RETURNING id, name, email
            ",
        )
        .bind(&new_account.name)
        .bind(new_account.email.as_ref().map(Email::as_str))
        .fetch_one(self.pool)
        .await?;

        let account = Account::try_from(row)?;
        tracing::info!(user_id = %account.id, "Registry user created");
        Ok(account)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn test_create_with_and_without_email() {
        let pool = create_memory_pool().await.unwrap();
        let repo = AccountRepository::new(&pool);

        let ada = repo
            .create(&NewAccount {
                name: "Ada".to_string(),
                email: Some(Email::parse("ada@x.com").unwrap()),
            })
            .await
            .unwrap();
        let bob = repo
            .create(&NewAccount {
                name: "Bob".to_string(),
                email: None,
            })
            .await
            .unwrap();

        assert_eq!(bob.email, None);
        assert_eq!(repo.list().await.unwrap(), vec![ada.clone(), bob]);
        assert_eq!(repo.get_by_id(ada.id).await.unwrap(), Some(ada));
    }

    #[tokio::test]
    async fn test_email_is_not_unique() {
        let pool = create_memory_pool().await.unwrap();
        let repo = AccountRepository::new(&pool);
        let shared = NewAccount {
            name: "Twin".to_string(),
            email: Some(Email::parse("twins@x.com").unwrap()),
        };

        repo.create(&shared).await.unwrap();
        repo.create(&shared).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let pool = create_memory_pool().await.unwrap();
        let found = AccountRepository::new(&pool)
            .get_by_id(AccountId::new(1))
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
