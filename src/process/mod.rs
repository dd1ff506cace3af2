pub mod date_parser;
pub mod record;
pub mod rows;
pub mod utils;

pub use record::{validate, PhishRecord, RejectReason};
pub use rows::{FeedRows, RawRow};
