pub mod property;
pub mod saved_property;

pub use property::{ListingKind, NewProperty, Property, PropertyPatch};
pub use saved_property::{SaveOutcome, SavedProperty, UnsaveOutcome};
