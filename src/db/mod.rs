use anyhow::{Context, Result};
use sqlx::{
    Connection, MySql, MySqlConnection, Pool,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
};
use std::time::Duration;

use crate::config::Config;

#[cfg(test)]
pub mod memory_store;
pub mod schema;
pub mod user_store;

pub type DbPool = Pool<MySql>;

fn server_options(config: &Config) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
}

/// Initialize the database connection pool, bootstrapping the schema first
pub async fn init_db_pool(config: &Config) -> Result<DbPool> {
    // The database may not exist yet, so bootstrap over a server-level connection
    let mut conn = MySqlConnection::connect_with(&server_options(config))
        .await
        .with_context(|| format!("failed to connect to MySQL at {}", config.db_host))?;
    tracing::info!("Connected to MySQL at {}:{}", config.db_host, config.db_port);

    schema::create_database(&mut conn, &config.db_name).await?;
    conn.close().await.context("failed to close bootstrap connection")?;

    // Every pooled connection selects the target database on connect
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_pool_size)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(server_options(config).database(&config.db_name))
        .await
        .with_context(|| format!("failed to switch to database '{}'", config.db_name))?;

    schema::verify_database(&pool, &config.db_name).await?;
    schema::run_migrations(&pool).await?;
    tracing::info!("Database '{}' and 'users' table ready.", config.db_name);

    Ok(pool)
}
