#![forbid(unsafe_code)]

pub mod profile_store;
pub mod records;
pub mod repository;
pub mod sqlite;

pub use profile_store::ProfileStore;
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
