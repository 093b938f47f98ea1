//! Infrastructure adapters implementing the store contract.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryStore, OfferingLinkRow};
pub use postgres::PostgresStore;
