//! Direct prediction route.
//!
//! Proxies the scoring oracle; when the oracle is down the deterministic
//! fallback answers instead, so this endpoint never fails on oracle
//! unavailability.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::domains::pricing::activities::predict_price;
use crate::server::app::AppState;
use ml_client::{Prediction, PredictionRequest};

#[derive(Serialize)]
pub struct PredictionEnvelope {
    success: bool,
    prediction: Prediction,
}

/// POST /api/ml/predict-price
pub async fn predict_price_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Json<PredictionEnvelope> {
    let prediction = predict_price(&request, &state.deps).await;
    Json(PredictionEnvelope {
        success: true,
        prediction,
    })
}
