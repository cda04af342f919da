use anyhow::{Context, Result, bail};
use sqlx::MySqlConnection;

use crate::db::DbPool;

/// A schema change applied at most once, tracked in `schema_migrations`.
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub sql: &'static str,
}

/// Ordered by version; never edit an entry once it has shipped.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create users table",
    sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id INT AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            deleted_at DATETIME DEFAULT NULL
        )
        "#,
}];

/// Quote a MySQL identifier with backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Create the database if it is absent. Runs on a server-level connection.
pub async fn create_database(conn: &mut MySqlConnection, name: &str) -> Result<()> {
    let statement = format!("CREATE DATABASE IF NOT EXISTS {}", quote_identifier(name));
    sqlx::raw_sql(&statement)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("failed to create database '{name}'"))?;

    Ok(())
}

/// Apply every migration not yet recorded in `schema_migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version BIGINT PRIMARY KEY,
            description VARCHAR(255) NOT NULL,
            applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create schema_migrations table")?;

    let applied: Vec<i64> = sqlx::query_scalar("SELECT version FROM schema_migrations")
        .fetch_all(pool)
        .await
        .context("failed to read applied migrations")?;

    for migration in pending(&applied) {
        tracing::info!(
            version = migration.version,
            "Applying migration: {}",
            migration.description
        );

        sqlx::query(migration.sql)
            .execute(pool)
            .await
            .with_context(|| format!("migration {} failed", migration.version))?;

        sqlx::query("INSERT IGNORE INTO schema_migrations (version, description) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(pool)
            .await
            .with_context(|| format!("failed to record migration {}", migration.version))?;
    }

    Ok(())
}

/// Confirm the pool's connections are bound to `expected`.
pub async fn verify_database(pool: &DbPool, expected: &str) -> Result<()> {
    let current: Option<String> = sqlx::query_scalar("SELECT DATABASE()")
        .fetch_one(pool)
        .await
        .context("failed to query the active database")?;

    match current {
        Some(name) if name == expected => Ok(()),
        Some(name) => bail!("connected to database '{name}', expected '{expected}'"),
        None => bail!("no database selected, expected '{expected}'"),
    }
}

fn pending(applied: &[i64]) -> impl Iterator<Item = &'static Migration> + '_ {
    MIGRATIONS
        .iter()
        .filter(move |migration| !applied.contains(&migration.version))
}
