//! Pricing domain - derived price invariants and the fair-price verdict.
//!
//! Both pieces are pure. `derive_price_per_sqft` maintains the
//! price-per-area invariant on property records; `ScoreVerdict` buckets the
//! 0-100 AI score into the label shown to buyers.

pub mod activities;

use serde::{Deserialize, Serialize};

use crate::common::CoreError;

/// Compute price per square foot, rounded half-up.
///
/// Returns `None` when either input is missing or the area is not positive.
/// Must be re-run and stored whenever price or total area changes; records
/// are never persisted with a stale value.
pub fn derive_price_per_sqft(price: Option<i64>, total_area: Option<f64>) -> Option<i64> {
    match (price, total_area) {
        (Some(price), Some(area)) if area > 0.0 => Some((price as f64 / area).round() as i64),
        _ => None,
    }
}

/// Fair-price verdict derived from the AI score. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreVerdict {
    GreatDeal,
    FairPrice,
    AboveMarket,
    Overpriced,
}

impl ScoreVerdict {
    /// Classify a score in [0, 100] into a verdict bucket.
    ///
    /// Thresholds are inclusive lower bounds, evaluated high to low:
    /// >= 85 great deal, >= 70 fair price, >= 50 above market, else
    /// overpriced. Out-of-range scores are rejected; callers clamp first.
    pub fn classify(score: f64) -> Result<Self, CoreError> {
        if !(0.0..=100.0).contains(&score) {
            return Err(CoreError::InvalidScore(score));
        }

        Ok(if score >= 85.0 {
            ScoreVerdict::GreatDeal
        } else if score >= 70.0 {
            ScoreVerdict::FairPrice
        } else if score >= 50.0 {
            ScoreVerdict::AboveMarket
        } else {
            ScoreVerdict::Overpriced
        })
    }

    /// Human-facing label, matching the ML service's market position strings.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreVerdict::GreatDeal => "GREAT DEAL",
            ScoreVerdict::FairPrice => "FAIR PRICE",
            ScoreVerdict::AboveMarket => "ABOVE MARKET",
            ScoreVerdict::Overpriced => "OVERPRICED",
        }
    }
}
