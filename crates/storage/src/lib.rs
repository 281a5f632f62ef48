pub mod repository;
pub mod sqlite;

pub use repository::{IdentityRecord, IdentityRepository, InMemoryRepository, Storage, StorageError};
