//! PropWorth API core.
//!
//! Property-listing marketplace backend: typed search filters, listing CRUD
//! with owner enforcement, saved-property relationships with denormalized
//! counters, and best-effort AI price scoring through an external oracle.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
