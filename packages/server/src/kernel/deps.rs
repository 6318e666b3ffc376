//! Server dependencies for activities (using traits for testability)
//!
//! Central dependency container handed to all domain activities. External
//! services sit behind trait abstractions so tests can swap in the in-memory
//! store and a scripted oracle.

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use super::price_oracle::MlServiceAdapter;
use super::store::PostgresListingStore;
use super::traits::{BaseListingStore, BasePriceOracle};
use crate::config::Config;

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub listings: Arc<dyn BaseListingStore>,
    pub price_oracle: Arc<dyn BasePriceOracle>,
}

impl ServerDeps {
    /// Production wiring: Postgres store + the remote prediction service.
    pub fn new(pool: PgPool, config: &Config) -> Result<Self> {
        let oracle = MlServiceAdapter::new(
            config.ml_service_url.clone(),
            Duration::from_secs(config.ml_timeout_secs),
        )?;

        Ok(Self {
            listings: Arc::new(PostgresListingStore::new(pool)),
            price_oracle: Arc::new(oracle),
        })
    }

    /// Custom wiring (tests, alternative stores).
    pub fn with_services(
        listings: Arc<dyn BaseListingStore>,
        price_oracle: Arc<dyn BasePriceOracle>,
    ) -> Self {
        Self {
            listings,
            price_oracle,
        }
    }
}
