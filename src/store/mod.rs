//! In-memory persistence host
//!
//! Tracks, per write, which fields changed and their previously
//! persisted values, and runs before-validate hooks before persisting.

mod errors;
mod memory;
mod record;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::{Record, RecordId};
