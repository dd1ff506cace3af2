use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::process::{validate, FeedRows, RejectReason};
use crate::store::{PhishStore, UpsertOutcome};

/// Counters reported at the end of a run. Per-row rejections and write
/// failures live here and nowhere else — they never change the exit code.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub rows_read: u64,
    pub inserted: u64,
    pub updated: u64,
    pub write_failures: u64,
    pub rejected_malformed: u64,
    pub rejected_missing_field: u64,
    pub rejected_invalid_url: u64,
    pub rejected_invalid_boolean: u64,
}

impl RunSummary {
    pub fn upserted(&self) -> u64 {
        self.inserted + self.updated
    }

    pub fn rejected(&self) -> u64 {
        self.rejected_malformed
            + self.rejected_missing_field
            + self.rejected_invalid_url
            + self.rejected_invalid_boolean
    }

    fn count_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::MalformedRow => self.rejected_malformed += 1,
            RejectReason::MissingRequiredField => self.rejected_missing_field += 1,
            RejectReason::InvalidUrl => self.rejected_invalid_url += 1,
            RejectReason::InvalidBoolean => self.rejected_invalid_boolean += 1,
        }
    }
}

/// Run the transform-and-load over an already-fetched CSV body: parse each
/// row, validate it, upsert valid records one at a time. Strictly sequential;
/// a row's failure (rejection or write error) is counted and the run moves on.
pub async fn run<S: PhishStore>(
    store: &S,
    csv_text: &str,
    max_rows: Option<u64>,
) -> RunSummary {
    let ingested_at = Utc::now();
    let mut summary = RunSummary::default();

    for row in FeedRows::new(csv_text) {
        if let Some(cap) = max_rows {
            if summary.rows_read >= cap {
                break;
            }
        }
        summary.rows_read += 1;

        let record = match validate(&row, ingested_at) {
            Ok(record) => record,
            Err(reason) => {
                debug!(%reason, "row rejected");
                summary.count_rejection(reason);
                continue;
            }
        };

        match store.upsert(&record).await {
            Ok(UpsertOutcome::Inserted) => summary.inserted += 1,
            Ok(UpsertOutcome::Updated) => summary.updated += 1,
            Err(e) => {
                error!(phish_id = %record.phish_id, "upsert failed: {e:#}");
                summary.write_failures += 1;
            }
        }
    }

    info!(
        rows_read = summary.rows_read,
        inserted = summary.inserted,
        updated = summary.updated,
        rejected = summary.rejected(),
        write_failures = summary.write_failures,
        "run complete"
    );
    summary
}
