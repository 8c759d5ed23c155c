pub mod metrics;
pub mod store;

pub use metrics::{Metrics, reduce};
pub use store::{FileBackend, MemoryBackend, SessionStore, StorageBackend, StoreError};
