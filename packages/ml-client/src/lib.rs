//! Pure REST client for the price-prediction ML service
//!
//! A minimal client for the externally-hosted prediction oracle with no
//! domain-specific logic. The service is treated as unreliable: callers that
//! must always produce an answer substitute [`fallback_prediction`], a
//! deterministic local estimate, when the service is unreachable.
//!
//! # Example
//!
//! ```rust,ignore
//! use ml_client::{MlClient, PredictionRequest};
//!
//! let client = MlClient::new("http://localhost:5001".to_string())?;
//!
//! let prediction = client
//!     .predict_price(&PredictionRequest {
//!         city: Some("Pune".into()),
//!         total_area: Some(1200.0),
//!         price: Some(9_500_000.0),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{MlError, Result};
pub use types::{Prediction, PredictionRequest, PredictionResponse, PriceRange};

use std::time::Duration;

use tracing::debug;

/// Default request timeout. The oracle call is bounded so a slow service
/// cannot stall the callers embedding it in a write path.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Price assumed by the fallback when the caller supplied none.
pub const FALLBACK_BASE_PRICE: f64 = 5_000_000.0;

/// Client for the price-prediction service.
pub struct MlClient {
    base_url: String,
    client: reqwest::Client,
}

impl MlClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: String) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MlError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Request a price prediction from the service. Single attempt, no retry.
    pub async fn predict_price(&self, request: &PredictionRequest) -> Result<Prediction> {
        let url = format!("{}/predict-price", self.base_url);
        debug!(url = %url, "Requesting price prediction");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| MlError::Network(format!("Prediction request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MlError::Api(format!("ML service error {}: {}", status, body)));
        }

        let envelope: PredictionResponse = response
            .json()
            .await
            .map_err(|e| MlError::Parse(format!("Invalid prediction response: {}", e)))?;

        if !envelope.success {
            return Err(MlError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| "Prediction rejected by ML service".to_string()),
            ));
        }

        envelope
            .prediction
            .ok_or_else(|| MlError::Parse("Missing prediction in success response".to_string()))
    }
}

/// Deterministic local estimate used when the prediction service is down.
///
/// The values are part of the observable contract: asking price (default
/// 5,000,000) echoed back with a 75 score and a +/-10% range.
pub fn fallback_prediction(price: Option<f64>) -> Prediction {
    let base = price.unwrap_or(FALLBACK_BASE_PRICE);
    Prediction {
        predicted_price: base,
        confidence: 0.75,
        ai_score: 75.0,
        price_range: PriceRange {
            min: base * 0.9,
            max: base * 1.1,
        },
        market_position: "FAIR PRICE".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_prediction_without_price() {
        let prediction = fallback_prediction(None);
        assert_eq!(prediction.predicted_price, 5_000_000.0);
        assert_eq!(prediction.ai_score, 75.0);
        assert_eq!(prediction.confidence, 0.75);
        assert_eq!(prediction.price_range.min, 4_500_000.0);
        assert_eq!(prediction.price_range.max, 5_500_000.0);
        assert_eq!(prediction.market_position, "FAIR PRICE");
    }

    #[test]
    fn test_fallback_prediction_with_price() {
        let prediction = fallback_prediction(Some(2_000_000.0));
        assert_eq!(prediction.predicted_price, 2_000_000.0);
        assert_eq!(prediction.price_range.min, 1_800_000.0);
        assert_eq!(prediction.price_range.max, 2_200_000.0);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MlClient::new("http://localhost:5001/".to_string()).unwrap();
        assert_eq!(client.base_url, "http://localhost:5001");
    }
}
