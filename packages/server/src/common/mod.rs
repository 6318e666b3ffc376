// Common types and utilities shared across the application

pub mod errors;
pub mod pagination;

pub use errors::CoreError;
pub use pagination::{PageArgs, Pagination, ValidatedPage};
