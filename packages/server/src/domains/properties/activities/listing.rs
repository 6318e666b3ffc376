//! Listing activities: search, detail, create, update, delete.
//!
//! Create and update are two-phase: the record is persisted first, then the
//! scoring oracle is attempted best-effort for sale listings. An oracle
//! failure is logged and absorbed; it never unwinds the write.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::{CoreError, Pagination};
use crate::domains::pricing::derive_price_per_sqft;
use crate::domains::properties::data::PropertyData;
use crate::domains::properties::models::{NewProperty, Property, PropertyPatch};
use crate::domains::properties::queries::PropertyFilters;
use crate::kernel::ServerDeps;
use ml_client::{Prediction, PredictionRequest};

/// One page of listing search results.
#[derive(Debug, Serialize)]
pub struct PropertyPage {
    pub properties: Vec<PropertyData>,
    pub pagination: Pagination,
}

/// Search listings with validated filters, newest first.
pub async fn list_properties(
    filters: &PropertyFilters,
    deps: &ServerDeps,
) -> Result<PropertyPage, CoreError> {
    let query = filters.build()?;
    let (records, total) = deps.listings.find_page(&query).await?;

    Ok(PropertyPage {
        properties: records.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(query.page.page, query.page.limit, total),
    })
}

/// Fetch a listing for the detail view. Counts the view as part of the same
/// store operation, so repeated fetches each increment exactly once.
pub async fn get_property(id: Uuid, deps: &ServerDeps) -> Result<PropertyData, CoreError> {
    deps.listings
        .fetch_for_detail(id)
        .await?
        .map(Into::into)
        .ok_or(CoreError::NotFound("Property"))
}

/// Create a listing owned by the authenticated principal.
pub async fn create_property(
    owner_id: Uuid,
    input: NewProperty,
    deps: &ServerDeps,
) -> Result<PropertyData, CoreError> {
    let now = Utc::now();
    let property = Property {
        id: Uuid::new_v4(),
        owner_id,
        kind: input.kind,
        state: input.state,
        city: input.city,
        area: input.area,
        landmark: input.landmark,
        pincode: input.pincode,
        latitude: input.latitude,
        longitude: input.longitude,
        property_type: input.property_type,
        bhk_type: input.bhk_type,
        total_area: input.total_area,
        price: input.price,
        price_per_sqft: derive_price_per_sqft(input.price, input.total_area),
        total_floors: input.total_floors,
        property_floor: input.property_floor,
        age: input.age,
        furnishing: input.furnishing,
        amenities: input.amenities,
        images: input.images,
        predicted_price: None,
        ai_score: None,
        price_range_min: None,
        price_range_max: None,
        is_verified: false,
        is_active: true,
        views: 0,
        saves: 0,
        created_at: now,
        updated_at: now,
    };

    // Phase 1: the listing is durable regardless of what the oracle does.
    let property = deps.listings.insert(property).await?;
    info!(property_id = %property.id, kind = property.kind.as_str(), "Property created");

    // Phase 2: best-effort enrichment for sale listings.
    if property.kind.is_sale() {
        match enrich_with_prediction(property.clone(), deps).await {
            Ok(enriched) => return Ok(enriched.into()),
            Err(e) => {
                warn!(property_id = %property.id, error = %e, "Price prediction unavailable, listing created without AI fields");
            }
        }
    }

    Ok(property.into())
}

/// Update a listing. Only the owner may update; the patch cannot reassign
/// ownership. The derived price-per-area is recomputed in the same write
/// whenever price or area change.
pub async fn update_property(
    id: Uuid,
    owner_id: Uuid,
    patch: PropertyPatch,
    deps: &ServerDeps,
) -> Result<PropertyData, CoreError> {
    let property = deps
        .listings
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound("Property"))?;

    if property.owner_id != owner_id {
        return Err(CoreError::Forbidden("only the owner may update a property"));
    }

    let repriced = patch.touches_pricing();
    let mut merged = apply_patch(property, patch);
    if repriced {
        merged.price_per_sqft = derive_price_per_sqft(merged.price, merged.total_area);
    }

    let updated = deps.listings.update(merged).await?;

    // Pricing changed on a sale listing: refresh the AI fields, best-effort.
    if repriced && updated.kind.is_sale() {
        match enrich_with_prediction(updated.clone(), deps).await {
            Ok(enriched) => return Ok(enriched.into()),
            Err(e) => {
                warn!(property_id = %updated.id, error = %e, "Price prediction unavailable, keeping stale AI fields");
            }
        }
    }

    Ok(updated.into())
}

/// Delete a listing. Only the owner may delete; deletion is permanent.
pub async fn delete_property(id: Uuid, owner_id: Uuid, deps: &ServerDeps) -> Result<(), CoreError> {
    let property = deps
        .listings
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound("Property"))?;

    if property.owner_id != owner_id {
        return Err(CoreError::Forbidden("only the owner may delete a property"));
    }

    deps.listings.delete(id).await?;
    info!(property_id = %id, "Property deleted");
    Ok(())
}

/// Ask the oracle for a prediction and persist the AI fields.
async fn enrich_with_prediction(
    mut property: Property,
    deps: &ServerDeps,
) -> anyhow::Result<Property> {
    let prediction = deps
        .price_oracle
        .predict(&prediction_request(&property))
        .await?;
    apply_prediction(&mut property, &prediction);
    deps.listings.update(property).await
}

/// Oracle input assembled from a listing's attributes.
pub fn prediction_request(property: &Property) -> PredictionRequest {
    PredictionRequest {
        state: Some(property.state.clone()),
        city: Some(property.city.clone()),
        area: Some(property.area.clone()),
        property_type: Some(property.property_type.clone()),
        bhk_type: property.bhk_type.clone(),
        total_area: property.total_area,
        property_floor: property.property_floor,
        total_floors: property.total_floors,
        age: property.age.clone(),
        furnishing: property.furnishing.clone(),
        price: property.price.map(|p| p as f64),
    }
}

fn apply_prediction(property: &mut Property, prediction: &Prediction) {
    property.predicted_price = Some(prediction.predicted_price);
    property.ai_score = Some(prediction.ai_score.clamp(0.0, 100.0));
    property.price_range_min = Some(prediction.price_range.min);
    property.price_range_max = Some(prediction.price_range.max);
}

fn apply_patch(mut property: Property, patch: PropertyPatch) -> Property {
    if let Some(state) = patch.state {
        property.state = state;
    }
    if let Some(city) = patch.city {
        property.city = city;
    }
    if let Some(area) = patch.area {
        property.area = area;
    }
    if let Some(landmark) = patch.landmark {
        property.landmark = Some(landmark);
    }
    if let Some(pincode) = patch.pincode {
        property.pincode = Some(pincode);
    }
    if let Some(latitude) = patch.latitude {
        property.latitude = Some(latitude);
    }
    if let Some(longitude) = patch.longitude {
        property.longitude = Some(longitude);
    }
    if let Some(property_type) = patch.property_type {
        property.property_type = property_type;
    }
    if let Some(bhk_type) = patch.bhk_type {
        property.bhk_type = Some(bhk_type);
    }
    if let Some(total_area) = patch.total_area {
        property.total_area = Some(total_area);
    }
    if let Some(price) = patch.price {
        property.price = Some(price);
    }
    if let Some(total_floors) = patch.total_floors {
        property.total_floors = Some(total_floors);
    }
    if let Some(property_floor) = patch.property_floor {
        property.property_floor = Some(property_floor);
    }
    if let Some(age) = patch.age {
        property.age = Some(age);
    }
    if let Some(furnishing) = patch.furnishing {
        property.furnishing = Some(furnishing);
    }
    if let Some(amenities) = patch.amenities {
        property.amenities = amenities;
    }
    if let Some(images) = patch.images {
        property.images = images;
    }
    if let Some(is_active) = patch.is_active {
        property.is_active = is_active;
    }
    property
}
