// SPDX-License-Identifier: BUSL-1.1
//! # Database Persistence Layer
//!
//! Optional Postgres mirror via SQLx. The in-memory market store is
//! authoritative; when `DATABASE_URL` is set the API additionally writes
//! placed orders and cart lines through to PostgreSQL so they survive
//! restarts and feed downstream reporting. When absent, the API runs
//! in-memory only, which is what development and the test suite use.
//!
//! Write-through is post-commit and fire-and-forget: a failed mirror write
//! is logged and never surfaces to the client, because the placement has
//! already committed in the authoritative store.

pub mod carts;
pub mod orders;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 Orders will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
