// SPDX-License-Identifier: BUSL-1.1
//! Shared application state: the in-memory market, the checkout service
//! over it, runtime configuration, the optional Postgres mirror, and the
//! metrics registry.

use bazaar_checkout::CheckoutService;
use bazaar_store::InMemoryMarket;
use sqlx::PgPool;

use crate::middleware::metrics::ApiMetrics;

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Service bearer token. `None` disables the auth middleware —
    /// intended for tests and local development only.
    pub auth_token: Option<String>,
}

impl ApiConfig {
    /// Read configuration from `BAZAAR_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            auth_token: std::env::var("BAZAAR_AUTH_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
        }
    }
}

/// Shared application state. Cheaply cloneable; all clones share the same
/// market data.
#[derive(Clone)]
pub struct AppState {
    pub market: InMemoryMarket,
    pub checkout: CheckoutService<InMemoryMarket>,
    pub config: ApiConfig,
    /// Postgres write-through mirror; `None` means in-memory-only mode.
    pub db: Option<PgPool>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Fresh state with no auth token and no database — the configuration
    /// tests run under.
    pub fn new() -> Self {
        Self::with_config(ApiConfig::default(), None)
    }

    /// State with explicit configuration and optional database pool.
    pub fn with_config(config: ApiConfig, db: Option<PgPool>) -> Self {
        let market = InMemoryMarket::new();
        Self {
            checkout: CheckoutService::new(market.clone()),
            market,
            config,
            db,
            metrics: ApiMetrics::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
