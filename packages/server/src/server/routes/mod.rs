pub mod health;
pub mod ml;
pub mod properties;
