//! Pricing activities - direct prediction queries.

use tracing::warn;

use crate::kernel::ServerDeps;
use ml_client::{fallback_prediction, Prediction, PredictionRequest};

/// Ask the oracle for a prediction, substituting the deterministic fallback
/// when it is unreachable. Used by the direct prediction endpoint, which must
/// always answer; listing enrichment takes the other path and simply skips
/// AI fields on failure.
pub async fn predict_price(request: &PredictionRequest, deps: &ServerDeps) -> Prediction {
    match deps.price_oracle.predict(request).await {
        Ok(prediction) => prediction,
        Err(e) => {
            warn!(error = %e, "ML service unavailable, serving fallback prediction");
            fallback_prediction(request.price)
        }
    }
}
