use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::process::date_parser::parse_timestamp;
use crate::process::rows::RawRow;

/// A feed row that passed validation. Always has a non-empty `phish_id` and a
/// syntactically valid `url`; everything else is optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhishRecord {
    pub phish_id: String,
    pub url: String,
    pub detail_url: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified: Option<bool>,
    pub online: Option<bool>,
    pub target: Option<String>,
    /// Stamp of the run that produced this version of the record.
    pub ingested_at: DateTime<Utc>,
}

/// Why a row was dropped. Rejections are counted per reason in the run
/// summary; none of them aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("row field count does not match header")]
    MalformedRow,
    #[error("phish_id or url missing/empty")]
    MissingRequiredField,
    #[error("url does not parse with a scheme and host")]
    InvalidUrl,
    #[error("unrecognized boolean token")]
    InvalidBoolean,
}

/// Validate and normalize one raw row. Pure: same row + same `ingested_at`
/// always produces the same result.
pub fn validate(row: &RawRow, ingested_at: DateTime<Utc>) -> Result<PhishRecord, RejectReason> {
    if row.is_malformed() {
        return Err(RejectReason::MalformedRow);
    }

    let phish_id = opt_field(row, "phish_id").ok_or(RejectReason::MissingRequiredField)?;
    let url = opt_field(row, "url").ok_or(RejectReason::MissingRequiredField)?;

    let parsed = Url::parse(&url).map_err(|_| RejectReason::InvalidUrl)?;
    if !parsed.has_host() {
        return Err(RejectReason::InvalidUrl);
    }

    Ok(PhishRecord {
        phish_id,
        url,
        detail_url: opt_field(row, "phish_detail_url"),
        submitted_at: opt_field(row, "submission_time").and_then(|s| parse_timestamp(&s)),
        verified_at: opt_field(row, "verification_time").and_then(|s| parse_timestamp(&s)),
        verified: opt_bool(row, "verified")?,
        online: opt_bool(row, "online")?,
        target: opt_field(row, "target"),
        ingested_at,
    })
}

/// Optional field access: whitespace-only and missing both normalize to
/// `None`, never to `Some("")`.
fn opt_field(row: &RawRow, name: &str) -> Option<String> {
    row.get(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// An absent or blank boolean field is unset; a present one must carry a
/// recognized token or the whole row is rejected.
fn opt_bool(row: &RawRow, name: &str) -> Result<Option<bool>, RejectReason> {
    match opt_field(row, name) {
        None => Ok(None),
        Some(token) => parse_bool(&token)
            .map(Some)
            .ok_or(RejectReason::InvalidBoolean),
    }
}

fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" => Some(true),
        "no" | "n" | "false" | "f" | "0" => Some(false),
        _ => None,
    }
}
