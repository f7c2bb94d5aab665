//! Store implementations backed by a database connection.

pub mod store;

pub use store::SeaOrmStore;
