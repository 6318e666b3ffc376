use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::properties::models::Property;

/// Property wire type
///
/// Public API representation of a listing (camelCase, the shape the REST
/// consumers expect).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub kind: String,

    pub state: String,
    pub city: String,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    pub property_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bhk_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_sqft: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_floors: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnishing: Option<String>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_price_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRangeData>,

    pub is_verified: bool,
    pub is_active: bool,
    pub views: i64,
    pub saves: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRangeData {
    pub min: f64,
    pub max: f64,
}

impl From<Property> for PropertyData {
    fn from(property: Property) -> Self {
        let coordinates = match (property.latitude, property.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        let price_range = match (property.price_range_min, property.price_range_max) {
            (Some(min), Some(max)) => Some(PriceRangeData { min, max }),
            _ => None,
        };

        Self {
            id: property.id.to_string(),
            owner_id: property.owner_id.to_string(),
            kind: property.kind.as_str().to_string(),
            state: property.state,
            city: property.city,
            area: property.area,
            landmark: property.landmark,
            pincode: property.pincode,
            coordinates,
            property_type: property.property_type,
            bhk_type: property.bhk_type,
            total_area: property.total_area,
            price: property.price,
            price_per_sqft: property.price_per_sqft,
            total_floors: property.total_floors,
            property_floor: property.property_floor,
            age: property.age,
            furnishing: property.furnishing,
            amenities: property.amenities,
            images: property.images,
            predicted_price: property.predicted_price,
            ai_price_score: property.ai_score,
            price_range,
            is_verified: property.is_verified,
            is_active: property.is_active,
            views: property.views,
            saves: property.saves,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}
