//! User repository for database operations.

use sqlx::SqlitePool;

use storeroom_core::{Email, UserId};

use super::{Constraint, RepositoryError, violated_constraint};
use crate::models::user::{AddressChange, NewUser, User, UserChanges};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    address: Option<String>,
    email: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            address: row.address,
        })
    }
}

/// Unique-email violations become conflicts.
fn map_email_conflict(err: sqlx::Error) -> RepositoryError {
    match violated_constraint(&err) {
        Some(Constraint::Unique) => RepositoryError::Conflict("email already exists".to_owned()),
        _ => RepositoryError::Database(err),
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, address, email
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, address, email
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Insert a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (name, address, email)
            VALUES (?, ?, ?)
            RETURNING id, name, address, email
            ",
        )
        .bind(&new_user.name)
        .bind(new_user.address.as_deref())
        .bind(&new_user.email)
        .fetch_one(self.pool)
        .await
        .map_err(map_email_conflict)?;

        let user = User::try_from(row)?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Overwrite a user's name and email, and optionally their address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email belongs to another user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: UserId, changes: &UserChanges) -> Result<User, RepositoryError> {
        let (replace_address, address) = match &changes.address {
            AddressChange::Keep => (false, None),
            AddressChange::Replace(address) => (true, address.as_deref()),
        };

        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET name = ?,
                email = ?,
                address = CASE WHEN ? THEN ? ELSE address END
            WHERE id = ?
            RETURNING id, name, address, email
            ",
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(replace_address)
        .bind(address)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_email_conflict)?
        .ok_or(RepositoryError::NotFound)?;

        tracing::info!(user_id = %id, "User updated");
        User::try_from(row)
    }

    /// Delete a user by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the user was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if orders still reference the user.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some(Constraint::ForeignKey) => {
                    RepositoryError::Conflict("user still has orders".to_owned())
                }
                _ => RepositoryError::Database(e),
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(user_id = %id, "User deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: Email::parse(email).unwrap(),
            address: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let created = repo.create(&new_user("Ada", "ada@x.com")).await.unwrap();
        assert_eq!(created.id, UserId::new(1));
        assert_eq!(created.address, None);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        assert!(repo.get_by_id(UserId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        repo.create(&new_user("Ada", "ada@x.com")).await.unwrap();
        let err = repo.create(&new_user("Other Ada", "ada@x.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_address_when_not_supplied() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let mut input = new_user("Ada", "ada@x.com");
        input.address = Some("1 Analytical Way".to_string());
        let user = repo.create(&input).await.unwrap();

        let updated = repo
            .update(
                user.id,
                &UserChanges {
                    name: "Ada L.".to_string(),
                    email: Email::parse("ada.l@x.com").unwrap(),
                    address: AddressChange::Keep,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.email.as_str(), "ada.l@x.com");
        assert_eq!(updated.address.as_deref(), Some("1 Analytical Way"));
    }

    #[tokio::test]
    async fn test_update_can_clear_address() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let mut input = new_user("Ada", "ada@x.com");
        input.address = Some("1 Analytical Way".to_string());
        let user = repo.create(&input).await.unwrap();

        let updated = repo
            .update(
                user.id,
                &UserChanges {
                    name: "Ada".to_string(),
                    email: Email::parse("ada@x.com").unwrap(),
                    address: AddressChange::Replace(None),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.address, None);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let ada = repo.create(&new_user("Ada", "ada@x.com")).await.unwrap();
        let bob = repo.create(&new_user("Bob", "bob@x.com")).await.unwrap();

        let err = repo
            .update(
                ada.id,
                &UserChanges {
                    name: "Ada".to_string(),
                    email: bob.email.clone(),
                    address: AddressChange::Keep,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        assert_eq!(repo.get_by_id(ada.id).await.unwrap().unwrap(), ada);
        assert_eq!(repo.get_by_id(bob.id).await.unwrap().unwrap(), bob);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let err = repo
            .update(
                UserId::new(5),
                &UserChanges {
                    name: "Nobody".to_string(),
                    email: Email::parse("nobody@x.com").unwrap(),
                    address: AddressChange::Keep,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = create_memory_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let user = repo.create(&new_user("Ada", "ada@x.com")).await.unwrap();
        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
