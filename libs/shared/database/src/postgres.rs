use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;
use tracing::{debug, info};

use shared_config::AppConfig;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Build the connection pool. Every connection gets a statement timeout so a
/// stuck lock wait surfaces as an error instead of holding the doctor row
/// indefinitely.
pub async fn connect_pool(config: &AppConfig) -> Result<PgPool> {
    let statement_timeout = format!(
        "SET statement_timeout = '{}s'",
        config.statement_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_db_connections)
        .acquire_timeout(Duration::from_secs(config.statement_timeout_secs))
        .after_connect(move |conn, _meta| {
            let statement_timeout = statement_timeout.clone();
            Box::pin(async move {
                conn.execute(statement_timeout.as_str()).await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    debug!("Connected to database");
    Ok(pool)
}

/// Idempotent schema bootstrap: doctors and appointments tables, the
/// `unique_doctor_time` constraint and the lookup indexes.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .context("failed to initialize database schema")?;

    info!("Database schema initialized");
    Ok(())
}
