//! Adapter putting the ML service client behind the BasePriceOracle trait.

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use super::traits::BasePriceOracle;
use ml_client::{MlClient, Prediction, PredictionRequest};

/// Wrapper around MlClient that implements the BasePriceOracle trait
pub struct MlServiceAdapter(MlClient);

impl MlServiceAdapter {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = MlClient::with_timeout(base_url, timeout)
            .map_err(|e| anyhow::anyhow!("Failed to create ML client: {}", e))?;
        Ok(Self(client))
    }
}

#[async_trait]
impl BasePriceOracle for MlServiceAdapter {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction> {
        self.0
            .predict_price(request)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}
