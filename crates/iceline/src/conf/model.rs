//! Model — ParserConfig.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::parser::model::{ConfigError, LogFormat};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Log format tag: "access-log" or "playlist-log"
    pub format: String,
    /// Input file path; stdin when absent
    pub input: Option<PathBuf>,
    /// Parse the trailing unterminated line at end of input
    pub flush_trailing: bool,
    /// Emit every non-blank line as a raw-line event before parsing
    pub emit_raw_lines: bool,
    /// Read size for the input loop, in bytes
    pub chunk_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: "access-log".to_string(),
            input: None,
            flush_trailing: false,
            emit_raw_lines: false,
            chunk_bytes: 64 * 1024,
        }
    }
}

impl ParserConfig {
    /// Resolve the format tag. An unknown tag is a fatal config error.
    pub fn format(&self) -> Result<LogFormat, ConfigError> {
        self.format.parse()
    }
}
