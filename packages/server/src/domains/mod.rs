// Business domains
pub mod pricing;
pub mod properties;
