use thiserror::Error;

/// Failure classes that abort an entire run. Everything else (malformed rows,
/// validation rejections, single upsert failures) is recovered locally and
/// only shows up in the run summary.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("store connection error: {0}")]
    StoreConnection(String),
}
