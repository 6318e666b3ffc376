pub mod activities;
pub mod data;
pub mod models;
pub mod queries;

pub use data::PropertyData;
pub use models::{ListingKind, NewProperty, Property, PropertyPatch};
pub use queries::{FilterClause, FilterField, ListingQuery, PropertyFilters};
