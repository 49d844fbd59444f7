use thiserror::Error;
use serde::{Serialize, Deserialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Icecast access log (CLF-like, with trailing listen duration)
    Access,
    /// Icecast playlist log (pipe-delimited track metadata)
    Playlist,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Access => "access-log",
            LogFormat::Playlist => "playlist-log",
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "access-log" => Ok(LogFormat::Access),
            "playlist-log" => Ok(LogFormat::Playlist),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown log format: {0:?} (expected \"access-log\" or \"playlist-log\")")]
    UnknownFormat(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Bad timestamp: {0:?}")]
    BadTimestamp(String),

    #[error("Bad number: {0:?}")]
    BadNumber(String),
}

/// One parsed Icecast access-log line.
///
/// `referer` and `agent` are `None` when the source field holds the
/// literal `-` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEntry {
    /// Client IP
    pub ip: String,
    /// Request timestamp, epoch milliseconds
    pub date: i64,
    /// HTTP method, empty when the request string had a single token
    pub method: String,
    pub url: String,
    /// HTTP protocol, empty when the request string had fewer than 3 tokens
    pub protocol: String,
    pub status: i32,
    /// Response size in bytes
    pub size: i64,
    pub referer: Option<String>,
    pub agent: Option<String>,
    /// Listen duration in seconds
    pub duration: i64,
}

/// One parsed Icecast playlist-log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Track start timestamp, epoch milliseconds
    pub date: i64,
    /// Mount point, empty when the field is absent
    pub mount: String,
    /// Listener count, `None` when the field is missing or empty
    pub count: Option<i64>,
    /// Track metadata with the leading " -" marker stripped
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LogEntry {
    Access(AccessEntry),
    Playlist(PlaylistEntry),
}

impl LogEntry {
    pub fn format(&self) -> LogFormat {
        match self {
            LogEntry::Access(_) => LogFormat::Access,
            LogEntry::Playlist(_) => LogFormat::Playlist,
        }
    }
}

/// Per-line failure signal. Never fatal: the pipeline keeps processing
/// subsequent lines in the same chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    /// The raw line text that did not match the grammar
    pub line: String,
    /// Running 1-based line index within the pipeline's lifetime
    pub index: u64,
}

/// One output event, emitted in line order.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// Raw non-blank line, prior to parsing (observability channel,
    /// enabled via `emit_raw_lines`)
    RawLine(String),
    Entry(LogEntry),
    Failure(ParseFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trip() {
        assert_eq!("access-log".parse::<LogFormat>().unwrap(), LogFormat::Access);
        assert_eq!("playlist-log".parse::<LogFormat>().unwrap(), LogFormat::Playlist);
        assert_eq!(LogFormat::Access.as_str(), "access-log");
        assert_eq!(LogFormat::Playlist.as_str(), "playlist-log");
    }

    #[test]
    fn test_unknown_format_is_construction_error() {
        let err = "error-log".parse::<LogFormat>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat(ref tag) if tag == "error-log"));
    }
}
