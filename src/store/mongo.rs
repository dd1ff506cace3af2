use std::time::Duration;

use anyhow::{Context, Result};
use mongodb::{
    bson::{doc, DateTime as BsonDateTime, Document},
    options::{ClientOptions, IndexOptions, ReplaceOptions},
    Client, Collection, IndexModel,
};
use tracing::info;

use crate::config::Config;
use crate::error::FatalError;
use crate::process::PhishRecord;
use crate::store::{PhishStore, UpsertOutcome};

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// MongoDB-backed store. One collection, one document per `phish_id`,
/// enforced by a unique index created at connect time.
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Establish the connection, ping it, and ensure the unique index on
    /// `phish_id`. Any failure here is fatal for the run.
    pub async fn connect(cfg: &Config) -> Result<Self, FatalError> {
        let conn_err = |e: mongodb::error::Error| FatalError::StoreConnection(e.to_string());

        let mut options = ClientOptions::parse(&cfg.mongo_uri).await.map_err(conn_err)?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        let client = Client::with_options(options).map_err(conn_err)?;

        // client construction is lazy; ping to surface unreachable servers now
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|_| {
                FatalError::StoreConnection(
                    "cannot reach MongoDB, check MONGO_URI and network access".to_string(),
                )
            })?;

        let collection = client
            .database(&cfg.mongo_db)
            .collection::<Document>(&cfg.mongo_collection);

        let index = IndexModel::builder()
            .keys(doc! { "phish_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index, None).await.map_err(conn_err)?;

        info!(db = %cfg.mongo_db, collection = %cfg.mongo_collection, "connected to MongoDB");
        Ok(MongoStore { collection })
    }
}

impl PhishStore for MongoStore {
    async fn upsert(&self, record: &PhishRecord) -> Result<UpsertOutcome> {
        let options = ReplaceOptions::builder().upsert(true).build();
        let result = self
            .collection
            .replace_one(doc! { "phish_id": &record.phish_id }, to_document(record), options)
            .await
            .with_context(|| format!("upsert of phish_id {} failed", record.phish_id))?;

        if result.upserted_id.is_some() {
            Ok(UpsertOutcome::Inserted)
        } else {
            Ok(UpsertOutcome::Updated)
        }
    }

    async fn find(&self, phish_id: &str) -> Result<Option<PhishRecord>> {
        let doc = self
            .collection
            .find_one(doc! { "phish_id": phish_id }, None)
            .await
            .with_context(|| format!("lookup of phish_id {phish_id} failed"))?;
        doc.as_ref().map(from_document).transpose()
    }

    async fn count(&self) -> Result<u64> {
        self.collection
            .count_documents(None, None)
            .await
            .context("counting documents failed")
    }
}

/// Field names on the wire follow the feed's column names, so the stored
/// documents stay greppable against the upstream CSV.
fn to_document(record: &PhishRecord) -> Document {
    let mut doc = doc! {
        "phish_id": &record.phish_id,
        "url": &record.url,
        "ingested_at": BsonDateTime::from_chrono(record.ingested_at),
    };
    if let Some(v) = &record.detail_url {
        doc.insert("phish_detail_url", v);
    }
    if let Some(v) = record.submitted_at {
        doc.insert("submission_time", BsonDateTime::from_chrono(v));
    }
    if let Some(v) = record.verified_at {
        doc.insert("verification_time", BsonDateTime::from_chrono(v));
    }
    if let Some(v) = record.verified {
        doc.insert("verified", v);
    }
    if let Some(v) = record.online {
        doc.insert("online", v);
    }
    if let Some(v) = &record.target {
        doc.insert("target", v);
    }
    doc
}

fn from_document(doc: &Document) -> Result<PhishRecord> {
    Ok(PhishRecord {
        phish_id: doc.get_str("phish_id").context("phish_id missing")?.to_string(),
        url: doc.get_str("url").context("url missing")?.to_string(),
        detail_url: doc.get_str("phish_detail_url").ok().map(str::to_string),
        submitted_at: doc.get_datetime("submission_time").ok().map(|d| d.to_chrono()),
        verified_at: doc
            .get_datetime("verification_time")
            .ok()
            .map(|d| d.to_chrono()),
        verified: doc.get_bool("verified").ok(),
        online: doc.get_bool("online").ok(),
        target: doc.get_str("target").ok().map(str::to_string),
        ingested_at: doc
            .get_datetime("ingested_at")
            .context("ingested_at missing")?
            .to_chrono(),
    })
}
