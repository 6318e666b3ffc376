pub mod property;

pub use property::{Coordinates, PriceRangeData, PropertyData};
