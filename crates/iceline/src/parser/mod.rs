/// Line-grammar parsing for Icecast logs
///
/// Converts complete log lines into structured, typed entries.
///
/// # Architecture
///
/// - `traits.rs`: the `LineParser` trait all grammars implement
/// - `formats/`: one parser per log format (access, playlist)
/// - `model.rs`: entry types, format enum, error types
/// - `timestamp.rs`: the shared Icecast date grammar
/// - `metrics.rs`: pipeline counters
///
/// Parsers are stateless and shared as `&'static dyn LineParser`;
/// all per-stream state lives in `stream::pipeline`.

pub mod traits;
pub mod formats;
pub mod metrics;
pub mod model;
pub mod timestamp;

// Re-export commonly used types
pub use traits::LineParser;
pub use model::{AccessEntry, LogEntry, LogFormat, ParseError, ParseEvent, ParseFailure, PlaylistEntry};
