//! Saved-property activities.
//!
//! The saves counter is owned entirely by the store's save/unsave
//! operations; nothing here (or anywhere else) adjusts it separately.

use tracing::info;
use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::properties::data::PropertyData;
use crate::domains::properties::models::{SaveOutcome, UnsaveOutcome};
use crate::kernel::ServerDeps;

/// Save a property for a principal. A pair can only be saved once; a repeat
/// save is a conflict, not a silent no-op.
pub async fn save_property(
    principal_id: Uuid,
    property_id: Uuid,
    deps: &ServerDeps,
) -> Result<(), CoreError> {
    deps.listings
        .find_by_id(property_id)
        .await?
        .ok_or(CoreError::NotFound("Property"))?;

    match deps.listings.save_for(principal_id, property_id).await? {
        SaveOutcome::Saved => {
            info!(principal_id = %principal_id, property_id = %property_id, "Property saved");
            Ok(())
        }
        SaveOutcome::AlreadySaved => Err(CoreError::Conflict("property already saved")),
    }
}

/// Remove a property from a principal's saved list.
pub async fn unsave_property(
    principal_id: Uuid,
    property_id: Uuid,
    deps: &ServerDeps,
) -> Result<(), CoreError> {
    match deps.listings.unsave_for(principal_id, property_id).await? {
        UnsaveOutcome::Removed => {
            info!(principal_id = %principal_id, property_id = %property_id, "Property unsaved");
            Ok(())
        }
        UnsaveOutcome::NotSaved => Err(CoreError::NotFound("Saved property")),
    }
}

/// Properties a principal has saved, most recently saved first.
pub async fn list_saved_properties(
    principal_id: Uuid,
    deps: &ServerDeps,
) -> Result<Vec<PropertyData>, CoreError> {
    let properties = deps.listings.find_saved_for(principal_id).await?;
    Ok(properties.into_iter().map(Into::into).collect())
}
