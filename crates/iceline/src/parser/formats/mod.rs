/// Individual line-grammar parsers, one per log format

pub mod access;
pub mod playlist;

pub use access::AccessLogParser;
pub use playlist::PlaylistLogParser;

use super::model::LogFormat;
use super::traits::LineParser;

/// Resolve the parser for a format. Closed dispatch: adding a format
/// extends this match and the `LogFormat` enum together.
pub fn parser_for(format: LogFormat) -> &'static dyn LineParser {
    match format {
        LogFormat::Access => &AccessLogParser,
        LogFormat::Playlist => &PlaylistLogParser,
    }
}
