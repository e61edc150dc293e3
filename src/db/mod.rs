pub mod schema;
pub mod user_repo;
pub mod tree_repo;
pub mod member_repo;
pub mod relationship_repo;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{ShajraError, ShajraResult};

/// Timestamps are stored as fixed-width RFC 3339 text so that string order
/// matches chronological order.
pub(crate) fn timestamp_column(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> ShajraResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| ShajraError::Other(format!("Invalid timestamp: {}", e)))
}
