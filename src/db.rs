use std::time::Duration;

use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

const BOOTSTRAP_SQL: &str = include_str!("../sql/productos.sql");

pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a sqlx connection pool. Connections are opened on first use, so an
/// unreachable database does not stop the server from starting.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    create_pool_with_timeout(database_url, DEFAULT_ACQUIRE_TIMEOUT)
}

/// Like [`create_pool`], with an explicit limit on waiting for a connection.
pub fn create_pool_with_timeout(database_url: &str, acquire_timeout: Duration) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)?;
    Ok(pool)
}

/// Wrap the sqlx pool in a SeaORM connection sharing the same connections.
pub fn orm_from_pool(pool: &DbPool) -> DatabaseConnection {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone())
}

/// Split the bootstrap script into individual statements, dropping comments and blanks.
pub fn bootstrap_statements() -> Vec<String> {
    BOOTSTRAP_SQL
        .split(';')
        .map(|chunk| {
            chunk
                .lines()
                .filter(|line| !line.trim_start().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .map(|stmt| stmt.trim().to_string())
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

/// Create the uuid extension and the `productos` table if they are missing.
pub async fn bootstrap_schema(pool: &DbPool) -> Result<()> {
    // Postgres prepared statements cannot contain multiple commands,
    // so run each statement of the script individually.
    for stmt in bootstrap_statements() {
        sqlx::query(&stmt).execute(pool).await?;
    }
    Ok(())
}

/// Single bootstrap attempt at startup. Failure is logged and the server keeps going.
pub async fn ensure_schema(pool: &DbPool) {
    match bootstrap_schema(pool).await {
        Ok(()) => tracing::info!("schema bootstrap complete: productos table ready"),
        Err(err) => tracing::error!(error = %err, "schema bootstrap failed; continuing without it"),
    }
}
