use chrono::DateTime;

use super::model::ParseError;

/// Icecast log timestamp layout: `19/Jun/2015:18:58:45 +0300`
const LAYOUT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Parse an Icecast log timestamp into epoch milliseconds.
///
/// Both log formats share this layout; the timezone offset is required
/// and applied, so the result is an absolute instant.
pub fn parse_millis(text: &str) -> Result<i64, ParseError> {
    DateTime::parse_from_str(text.trim(), LAYOUT)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| ParseError::BadTimestamp(text.to_string()))
}
