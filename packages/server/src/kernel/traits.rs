// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Ownership
// checks, error taxonomy, and enrichment policy live in domain activities;
// these traits just describe what the document store and the scoring oracle
// can do.
//
// Naming convention: Base* for trait names (e.g. BaseListingStore)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domains::properties::models::{Property, SaveOutcome, UnsaveOutcome};
use crate::domains::properties::queries::ListingQuery;
use ml_client::{Prediction, PredictionRequest};

// =============================================================================
// Listing store (document store contract)
// =============================================================================

/// Store contract for listings and the saved relationship.
///
/// Implementations must provide atomic counter mutation: `fetch_for_detail`
/// increments views in the same operation as the read, and save/unsave adjust
/// the saves counter together with the relationship change. Application code
/// never does a read-modify-write round trip on a counter.
#[async_trait]
pub trait BaseListingStore: Send + Sync {
    /// Count over the predicate, then the requested page, newest first.
    async fn find_page(&self, query: &ListingQuery) -> Result<(Vec<Property>, i64)>;

    /// Plain lookup without side effects.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>>;

    /// Detail-view lookup; increments views exactly once per call.
    async fn fetch_for_detail(&self, id: Uuid) -> Result<Option<Property>>;

    async fn insert(&self, property: Property) -> Result<Property>;

    /// Persist mutable fields of a merged record. Counters and owner are
    /// not written.
    async fn update(&self, property: Property) -> Result<Property>;

    /// Hard delete; returns rows removed.
    async fn delete(&self, id: Uuid) -> Result<u64>;

    /// Create the saved relationship and bump the counter atomically.
    async fn save_for(&self, principal_id: Uuid, property_id: Uuid) -> Result<SaveOutcome>;

    /// Remove the saved relationship and decrement the counter (floor 0).
    async fn unsave_for(&self, principal_id: Uuid, property_id: Uuid) -> Result<UnsaveOutcome>;

    /// Listings a principal has saved, most recently saved first.
    async fn find_saved_for(&self, principal_id: Uuid) -> Result<Vec<Property>>;
}

// =============================================================================
// Price oracle
// =============================================================================

/// Scoring oracle contract. One bounded attempt per call; callers decide
/// whether a failure is surfaced (direct query) or absorbed (create/update
/// enrichment).
#[async_trait]
pub trait BasePriceOracle: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction>;
}
