use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use crate::process::PhishRecord;
use crate::store::{PhishStore, UpsertOutcome};

/// Map-backed store with the same overwrite-by-key semantics as the MongoDB
/// implementation. Used by pipeline tests and local dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, PhishRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhishStore for MemoryStore {
    async fn upsert(&self, record: &PhishRecord) -> Result<UpsertOutcome> {
        let mut records = self.records.lock().unwrap();
        match records.insert(record.phish_id.clone(), record.clone()) {
            None => Ok(UpsertOutcome::Inserted),
            Some(_) => Ok(UpsertOutcome::Updated),
        }
    }

    async fn find(&self, phish_id: &str) -> Result<Option<PhishRecord>> {
        Ok(self.records.lock().unwrap().get(phish_id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.lock().unwrap().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, target: Option<&str>) -> PhishRecord {
        PhishRecord {
            phish_id: id.to_string(),
            url: format!("http://evil.example/{id}"),
            detail_url: None,
            submitted_at: None,
            verified_at: None,
            verified: Some(true),
            online: None,
            target: target.map(str::to_string),
            ingested_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn upsert_is_idempotent_by_key() {
        let store = MemoryStore::new();
        let rec = record("1", Some("BankCo"));

        assert_eq!(store.upsert(&rec).await.unwrap(), UpsertOutcome::Inserted);
        assert_eq!(store.upsert(&rec).await.unwrap(), UpsertOutcome::Updated);
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.find("1").await.unwrap().unwrap(), rec);
    }

    #[tokio::test]
    async fn upsert_fully_overwrites_prior_fields() {
        let store = MemoryStore::new();
        store.upsert(&record("1", Some("BankCo"))).await.unwrap();
        store.upsert(&record("1", None)).await.unwrap();

        let stored = store.find("1").await.unwrap().unwrap();
        // full replacement: the earlier target must not linger
        assert_eq!(stored.target, None);
    }
}
