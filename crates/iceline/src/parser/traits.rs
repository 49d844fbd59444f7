pub use super::model::{LogEntry, LogFormat, ParseError};

pub trait LineParser: Send + Sync {
    /// Parse one complete, non-blank line into a structured entry.
    fn parse(&self, line: &str) -> Result<LogEntry, ParseError>;
    fn format(&self) -> LogFormat;
}
