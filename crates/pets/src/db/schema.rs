//! Pet registry schema DDL.

use sqlx::SqlitePool;

/// Idempotent DDL for every pet registry table.
pub const PETS_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS user_account (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    email TEXT
);

CREATE TABLE IF NOT EXISTS pets (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name   TEXT NOT NULL,
    animal TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_pet (
    user_id INTEGER NOT NULL REFERENCES user_account (id),
    pet_id  INTEGER NOT NULL REFERENCES pets (id),
    PRIMARY KEY (user_id, pet_id)
);

CREATE INDEX IF NOT EXISTS idx_user_pet_pet_id ON user_pet (pet_id);
";

/// Create all pet registry tables that do not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(PETS_SCHEMA).execute(pool).await?;
    tracing::info!("Pet registry schema ready");
    Ok(())
}
