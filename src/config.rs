use crate::error::FatalError;
use std::env;

const DEFAULT_DB: &str = "etl_db";
const DEFAULT_COLLECTION: &str = "phishtank_raw";

/// Runtime settings, resolved once at startup and passed down explicitly.
/// No other component reads process environment state.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string (`MONGO_URI`).
    pub mongo_uri: String,
    /// URL of the PhishTank CSV feed (`PHISHTANK_URL`).
    pub feed_url: String,
    /// Target database name (`MONGO_DB`).
    pub mongo_db: String,
    /// Target collection name (`MONGO_COLLECTION`).
    pub mongo_collection: String,
    /// Optional cap on rows consumed per run (`FEED_MAX_ROWS`).
    pub max_rows: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, FatalError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary lookup function. `from_env` routes
    /// through here; tests inject a map instead of touching the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FatalError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| FatalError::Config(format!("{key} is not set")))
        };

        let max_rows = match lookup("FEED_MAX_ROWS") {
            None => None,
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                FatalError::Config(format!("FEED_MAX_ROWS is not a number: {raw:?}"))
            })?),
        };

        Ok(Config {
            mongo_uri: required("MONGO_URI")?,
            feed_url: required("PHISHTANK_URL")?,
            mongo_db: lookup("MONGO_DB").unwrap_or_else(|| DEFAULT_DB.to_string()),
            mongo_collection: lookup("MONGO_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            max_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_applied_for_optional_settings() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("PHISHTANK_URL", "http://feed.example/data.csv"),
        ]))
        .unwrap();

        assert_eq!(cfg.mongo_db, "etl_db");
        assert_eq!(cfg.mongo_collection, "phishtank_raw");
        assert_eq!(cfg.max_rows, None);
    }

    #[test]
    fn missing_feed_url_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("MONGO_URI", "mongodb://localhost")]))
            .unwrap_err();
        assert!(err.to_string().contains("PHISHTANK_URL"));
    }

    #[test]
    fn missing_mongo_uri_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("PHISHTANK_URL", "http://x.example/f.csv")]))
            .unwrap_err();
        assert!(err.to_string().contains("MONGO_URI"));
    }

    #[test]
    fn blank_required_value_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("MONGO_URI", "   "),
            ("PHISHTANK_URL", "http://x.example/f.csv"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("MONGO_URI"));
    }

    #[test]
    fn max_rows_parses_or_errors() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://localhost"),
            ("PHISHTANK_URL", "http://x.example/f.csv"),
            ("FEED_MAX_ROWS", "500"),
        ]))
        .unwrap();
        assert_eq!(cfg.max_rows, Some(500));

        let err = Config::from_lookup(lookup_from(&[
            ("MONGO_URI", "mongodb://localhost"),
            ("PHISHTANK_URL", "http://x.example/f.csv"),
            ("FEED_MAX_ROWS", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("FEED_MAX_ROWS"));
    }
}
