//! Listing routes: search, detail, CRUD, save/unsave.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::common::{CoreError, Pagination};
use crate::domains::properties::activities;
use crate::domains::properties::data::PropertyData;
use crate::domains::properties::models::{NewProperty, PropertyPatch};
use crate::domains::properties::queries::PropertyFilters;
use crate::server::app::AppState;
use crate::server::principal::Principal;

#[derive(Serialize)]
pub struct ListResponse {
    success: bool,
    properties: Vec<PropertyData>,
    pagination: Pagination,
}

#[derive(Serialize)]
pub struct PropertyResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    property: PropertyData,
}

#[derive(Serialize)]
pub struct MessageResponse {
    success: bool,
    message: String,
}

/// GET /api/properties
pub async fn list_properties(
    State(state): State<AppState>,
    Query(filters): Query<PropertyFilters>,
) -> Result<Json<ListResponse>, CoreError> {
    let page = activities::list_properties(&filters, &state.deps).await?;
    Ok(Json(ListResponse {
        success: true,
        properties: page.properties,
        pagination: page.pagination,
    }))
}

/// GET /api/properties/:id
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyResponse>, CoreError> {
    let property = activities::get_property(id, &state.deps).await?;
    Ok(Json(PropertyResponse {
        success: true,
        message: None,
        property,
    }))
}

/// POST /api/properties
pub async fn create_property(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<NewProperty>,
) -> Result<(StatusCode, Json<PropertyResponse>), CoreError> {
    let property = activities::create_property(principal.0, input, &state.deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(PropertyResponse {
            success: true,
            message: Some("Property created successfully".to_string()),
            property,
        }),
    ))
}

/// PUT /api/properties/:id
pub async fn update_property(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(patch): Json<PropertyPatch>,
) -> Result<Json<PropertyResponse>, CoreError> {
    let property = activities::update_property(id, principal.0, patch, &state.deps).await?;
    Ok(Json(PropertyResponse {
        success: true,
        message: Some("Property updated successfully".to_string()),
        property,
    }))
}

/// DELETE /api/properties/:id
pub async fn delete_property(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, CoreError> {
    activities::delete_property(id, principal.0, &state.deps).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Property deleted successfully".to_string(),
    }))
}

/// POST /api/properties/:id/save
pub async fn save_property(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, CoreError> {
    activities::save_property(principal.0, id, &state.deps).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Property saved successfully".to_string(),
    }))
}

/// DELETE /api/properties/:id/save
pub async fn unsave_property(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, CoreError> {
    activities::unsave_property(principal.0, id, &state.deps).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Property removed from saved".to_string(),
    }))
}

#[derive(Serialize)]
pub struct SavedListResponse {
    success: bool,
    properties: Vec<PropertyData>,
}

/// GET /api/properties/saved/list
pub async fn list_saved_properties(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<SavedListResponse>, CoreError> {
    let properties = activities::list_saved_properties(principal.0, &state.deps).await?;
    Ok(Json(SavedListResponse {
        success: true,
        properties,
    }))
}
