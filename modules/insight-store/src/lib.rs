//! Record stores and the in-memory snapshot the API serves from.

pub mod json_file;
pub mod snapshot;
pub mod store;

pub use json_file::{decode_records, JsonFileStore};
pub use snapshot::{Snapshot, SnapshotStore};
pub use store::{InMemoryStore, RecordStore};
