//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod price_oracle;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use price_oracle::MlServiceAdapter;
pub use store::PostgresListingStore;
pub use test_dependencies::{MemoryListingStore, MockPriceOracle, TestDependencies};
pub use traits::*;
