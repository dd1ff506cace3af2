pub mod memory;
pub mod mongo;

use anyhow::Result;

use crate::process::PhishRecord;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Whether an upsert created a new document or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Overwrite-by-key contract against the document collection. `upsert`
/// replaces the whole stored document for `phish_id` (no field-level merge),
/// inserting when the key is new. Each call is an independent unit; there is
/// no grouping or transaction across records.
#[allow(async_fn_in_trait)]
pub trait PhishStore {
    async fn upsert(&self, record: &PhishRecord) -> Result<UpsertOutcome>;

    async fn find(&self, phish_id: &str) -> Result<Option<PhishRecord>>;

    async fn count(&self) -> Result<u64>;
}
