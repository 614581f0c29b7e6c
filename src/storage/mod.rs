//! In-memory persisted store and the generic repository over it

pub mod database;
pub mod in_memory;
pub mod query;
pub mod schema;

pub use database::Database;
pub use in_memory::InMemoryRepository;
pub use query::UnknownFieldPolicy;
pub use schema::{Reference, Store, Stored, Table};
