//! Versioned schema migrations for the `books` table
//!
//! Migrations are forward-only and recorded in `shelf_migrations`. Each
//! pending migration runs in its own transaction together with its ledger
//! row, so a failed step leaves the schema at the previous version.
//!
//! Version 1 is the original schema without `notes`/`isbn`; version 2 brings
//! any such deployment up to the canonical schema.

use sqlx::PgPool;

use super::DbError;

/// A single schema step
pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

/// All migrations, in ascending version order
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_books",
        statements: &[r#"
            CREATE TABLE IF NOT EXISTS books (
                id SERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                rating INTEGER NOT NULL,
                recency DATE
            )
            "#],
    },
    Migration {
        version: 2,
        name: "add_notes_and_isbn",
        statements: &[
            "ALTER TABLE books ADD COLUMN IF NOT EXISTS notes TEXT",
            "ALTER TABLE books ADD COLUMN IF NOT EXISTS isbn TEXT",
        ],
    },
];

/// Latest schema version known to this build
pub fn latest_version() -> i32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Apply every pending migration. Returns how many were applied.
pub async fn run(pool: &PgPool) -> Result<usize, DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shelf_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    let current: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM shelf_migrations")
        .fetch_one(pool)
        .await?;

    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
    if pending.is_empty() {
        tracing::debug!(version = current, "schema up to date");
        return Ok(0);
    }

    for migration in &pending {
        tracing::info!(
            version = migration.version,
            name = migration.name,
            "applying migration"
        );

        let mut tx = pool.begin().await?;
        for statement in migration.statements {
            sqlx::query(*statement)
                .execute(&mut *tx)
                .await
                .map_err(|source| DbError::Migration {
                    version: migration.version,
                    source,
                })?;
        }
        sqlx::query("INSERT INTO shelf_migrations (version, name) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
    }

    Ok(pending.len())
}
