//! Postgres adapter for the listing store.
//!
//! Thin delegation to the model-layer sqlx functions; the interesting SQL
//! (atomic increments, transactional save/unsave, QueryBuilder predicates)
//! lives with the models.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::BaseListingStore;
use crate::domains::properties::models::{Property, SaveOutcome, SavedProperty, UnsaveOutcome};
use crate::domains::properties::queries::ListingQuery;

pub struct PostgresListingStore {
    pool: PgPool,
}

impl PostgresListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseListingStore for PostgresListingStore {
    async fn find_page(&self, query: &ListingQuery) -> Result<(Vec<Property>, i64)> {
        Property::find_page(query, &self.pool).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>> {
        Property::find_by_id(id, &self.pool).await
    }

    async fn fetch_for_detail(&self, id: Uuid) -> Result<Option<Property>> {
        Property::fetch_for_detail(id, &self.pool).await
    }

    async fn insert(&self, property: Property) -> Result<Property> {
        property.insert(&self.pool).await
    }

    async fn update(&self, property: Property) -> Result<Property> {
        property.update_record(&self.pool).await
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        Property::delete_by_id(id, &self.pool).await
    }

    async fn save_for(&self, principal_id: Uuid, property_id: Uuid) -> Result<SaveOutcome> {
        SavedProperty::save(principal_id, property_id, &self.pool).await
    }

    async fn unsave_for(&self, principal_id: Uuid, property_id: Uuid) -> Result<UnsaveOutcome> {
        SavedProperty::unsave(principal_id, property_id, &self.pool).await
    }

    async fn find_saved_for(&self, principal_id: Uuid) -> Result<Vec<Property>> {
        Property::find_saved_for(principal_id, &self.pool).await
    }
}
