// HTTP boundary: router, trusted-principal extraction, error mapping.

pub mod app;
pub mod error;
pub mod principal;
pub mod routes;

pub use app::{build_app, AppState};
pub use principal::Principal;
