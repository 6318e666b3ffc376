// TestDependencies - mock implementations for testing
//
// Provides an in-memory listing store and a scriptable price oracle that can
// be injected into ServerDeps for tests. The memory store evaluates the same
// typed filter clauses the Postgres adapter renders to SQL.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::deps::ServerDeps;
use super::traits::{BaseListingStore, BasePriceOracle};
use crate::domains::properties::models::{Property, SaveOutcome, SavedProperty, UnsaveOutcome};
use crate::domains::properties::queries::ListingQuery;
use ml_client::{Prediction, PredictionRequest, PriceRange};

// =============================================================================
// In-memory listing store
// =============================================================================

#[derive(Default)]
pub struct MemoryListingStore {
    properties: Mutex<HashMap<Uuid, Property>>,
    saved: Mutex<Vec<SavedProperty>>,
}

impl MemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a counter directly, bypassing the store API (test assertions).
    pub fn saves_counter(&self, property_id: Uuid) -> Option<i64> {
        self.properties
            .lock()
            .unwrap()
            .get(&property_id)
            .map(|p| p.saves)
    }

    /// Overwrite a counter out-of-band (floor-at-zero tests).
    pub fn set_saves_counter(&self, property_id: Uuid, saves: i64) {
        if let Some(property) = self.properties.lock().unwrap().get_mut(&property_id) {
            property.saves = saves;
        }
    }
}

#[async_trait]
impl BaseListingStore for MemoryListingStore {
    async fn find_page(&self, query: &ListingQuery) -> Result<(Vec<Property>, i64)> {
        let properties = self.properties.lock().unwrap();
        let mut matched: Vec<Property> = properties
            .values()
            .filter(|p| query.clauses.iter().all(|clause| clause.matches(p)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as i64;
        let page = matched
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>> {
        Ok(self.properties.lock().unwrap().get(&id).cloned())
    }

    async fn fetch_for_detail(&self, id: Uuid) -> Result<Option<Property>> {
        let mut properties = self.properties.lock().unwrap();
        Ok(properties.get_mut(&id).map(|property| {
            property.views += 1;
            property.clone()
        }))
    }

    async fn insert(&self, property: Property) -> Result<Property> {
        self.properties
            .lock()
            .unwrap()
            .insert(property.id, property.clone());
        Ok(property)
    }

    async fn update(&self, property: Property) -> Result<Property> {
        let mut properties = self.properties.lock().unwrap();
        let stored = properties
            .get(&property.id)
            .ok_or_else(|| anyhow::anyhow!("update of missing property {}", property.id))?;

        // Counters and owner are not written by update, mirroring the SQL.
        let mut merged = property;
        merged.owner_id = stored.owner_id;
        merged.views = stored.views;
        merged.saves = stored.saves;
        merged.updated_at = Utc::now();

        properties.insert(merged.id, merged.clone());
        Ok(merged)
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let removed = self.properties.lock().unwrap().remove(&id).is_some();
        if removed {
            self.saved.lock().unwrap().retain(|s| s.property_id != id);
        }
        Ok(removed as u64)
    }

    async fn save_for(&self, principal_id: Uuid, property_id: Uuid) -> Result<SaveOutcome> {
        let mut saved = self.saved.lock().unwrap();
        let exists = saved
            .iter()
            .any(|s| s.principal_id == principal_id && s.property_id == property_id);
        if exists {
            return Ok(SaveOutcome::AlreadySaved);
        }

        saved.push(SavedProperty {
            id: Uuid::new_v4(),
            principal_id,
            property_id,
            created_at: Utc::now(),
        });
        if let Some(property) = self.properties.lock().unwrap().get_mut(&property_id) {
            property.saves += 1;
        }
        Ok(SaveOutcome::Saved)
    }

    async fn unsave_for(&self, principal_id: Uuid, property_id: Uuid) -> Result<UnsaveOutcome> {
        let mut saved = self.saved.lock().unwrap();
        let before = saved.len();
        saved.retain(|s| !(s.principal_id == principal_id && s.property_id == property_id));
        if saved.len() == before {
            return Ok(UnsaveOutcome::NotSaved);
        }

        if let Some(property) = self.properties.lock().unwrap().get_mut(&property_id) {
            property.saves = property.saves.saturating_sub(1).max(0);
        }
        Ok(UnsaveOutcome::Removed)
    }

    async fn find_saved_for(&self, principal_id: Uuid) -> Result<Vec<Property>> {
        let saved = self.saved.lock().unwrap();
        let properties = self.properties.lock().unwrap();

        let mut relationships: Vec<&SavedProperty> = saved
            .iter()
            .filter(|s| s.principal_id == principal_id)
            .collect();
        relationships.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(relationships
            .iter()
            .filter_map(|s| properties.get(&s.property_id).cloned())
            .collect())
    }
}

// =============================================================================
// Mock price oracle
// =============================================================================

pub struct MockPriceOracle {
    prediction: Mutex<Option<Prediction>>,
    fail: Mutex<bool>,
    calls: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl MockPriceOracle {
    pub fn new() -> Self {
        Self {
            prediction: Mutex::new(None),
            fail: Mutex::new(false),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the prediction the oracle returns.
    pub fn with_prediction(self, prediction: Prediction) -> Self {
        *self.prediction.lock().unwrap() = Some(prediction);
        self
    }

    /// Make every predict call fail (unreachable oracle).
    pub fn failing(self) -> Self {
        *self.fail.lock().unwrap() = true;
        self
    }

    /// Requests captured from predict calls.
    pub fn calls(&self) -> Vec<PredictionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockPriceOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePriceOracle for MockPriceOracle {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction> {
        self.calls.lock().unwrap().push(request.clone());

        if *self.fail.lock().unwrap() {
            anyhow::bail!("connection refused");
        }

        Ok(self
            .prediction
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Prediction {
                predicted_price: 9_000_000.0,
                confidence: 0.92,
                ai_score: 82.0,
                price_range: PriceRange {
                    min: 8_100_000.0,
                    max: 9_900_000.0,
                },
                market_position: "FAIR PRICE".to_string(),
            }))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of mock services plus a ServerDeps wired to them.
pub struct TestDependencies {
    pub listings: Arc<MemoryListingStore>,
    pub price_oracle: Arc<MockPriceOracle>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            listings: Arc::new(MemoryListingStore::new()),
            price_oracle: Arc::new(MockPriceOracle::new()),
        }
    }

    pub fn with_oracle(oracle: MockPriceOracle) -> Self {
        Self {
            listings: Arc::new(MemoryListingStore::new()),
            price_oracle: Arc::new(oracle),
        }
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::with_services(self.listings.clone(), self.price_oracle.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
