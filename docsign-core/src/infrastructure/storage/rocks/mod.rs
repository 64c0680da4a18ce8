//! RocksDB-backed storage implementation.
//!
//! `RocksStore` is the persistent implementation of both `DocumentStore` and `ObjectStore`.
//! See `engine.rs` for lock semantics.

pub mod engine;
pub mod schema;
pub mod util;

pub use engine::RocksStore;
