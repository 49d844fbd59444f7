use crate::parser::traits::{LineParser, LogEntry, LogFormat, ParseError};
use crate::parser::model::PlaylistEntry;
use crate::parser::timestamp;

/// Parser for Icecast playlist logs.
///
/// Four pipe-delimited fields:
///
/// `20/Oct/2015:13:23:25 +0300|/radio|5888| - Test Artist - Test Title`
///
/// Unlike the access-log grammar, structurally short lines do not fail:
/// missing trailing fields degrade to defaults. Only an unparseable
/// timestamp rejects the line, since there is no usable default instant.
pub struct PlaylistLogParser;

impl LineParser for PlaylistLogParser {
    fn parse(&self, line: &str) -> Result<LogEntry, ParseError> {
        // Extra pipes belong to the metadata field, so split at most 4 ways.
        let mut fields = line.splitn(4, '|');

        let stamp = fields.next().unwrap_or("");
        let date = timestamp::parse_millis(stamp)?;

        let mount = fields.next().unwrap_or("").to_string();

        let count = fields
            .next()
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .and_then(|field| field.parse::<i64>().ok());

        let meta = fields
            .next()
            .map(|field| field.strip_prefix(" -").unwrap_or(field).trim().to_string())
            .unwrap_or_default();

        Ok(LogEntry::Playlist(PlaylistEntry { date, mount, count, meta }))
    }

    fn format(&self) -> LogFormat {
        LogFormat::Playlist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<PlaylistEntry, ParseError> {
        PlaylistLogParser.parse(line).map(|entry| match entry {
            LogEntry::Playlist(playlist) => playlist,
            other => panic!("unexpected entry kind: {:?}", other),
        })
    }

    #[test]
    fn test_parse_full_line() {
        let entry = parse("20/Oct/2015:13:23:25 +0300|/radio|5888| - Test Artist - Test Title").unwrap();
        assert_eq!(entry, PlaylistEntry {
            date: 1445336605000,
            mount: "/radio".to_string(),
            count: Some(5888),
            meta: "Test Artist - Test Title".to_string(),
        });
    }

    #[test]
    fn test_parse_empty_meta() {
        let entry = parse("20/Oct/2015:13:23:25 +0300|/radio|600| - ").unwrap();
        assert_eq!(entry.date, 1445336605000);
        assert_eq!(entry.count, Some(600));
        assert_eq!(entry.meta, "");
    }

    #[test]
    fn test_missing_trailing_fields_degrade() {
        let entry = parse("20/Oct/2015:13:23:25 +0300|/radio").unwrap();
        assert_eq!(entry.mount, "/radio");
        assert_eq!(entry.count, None);
        assert_eq!(entry.meta, "");

        let entry = parse("20/Oct/2015:13:23:25 +0300").unwrap();
        assert_eq!(entry.mount, "");
        assert_eq!(entry.count, None);
    }

    #[test]
    fn test_empty_count_is_unset() {
        let entry = parse("20/Oct/2015:13:23:25 +0300|/radio|| - Song").unwrap();
        assert_eq!(entry.count, None);
        assert_eq!(entry.meta, "Song");
    }

    #[test]
    fn test_meta_keeps_embedded_pipes() {
        let entry = parse("20/Oct/2015:13:23:25 +0300|/radio|5| - A|B").unwrap();
        assert_eq!(entry.meta, "A|B");
    }

    #[test]
    fn test_meta_without_marker() {
        let entry = parse("20/Oct/2015:13:23:25 +0300|/radio|5|  Plain Title  ").unwrap();
        assert_eq!(entry.meta, "Plain Title");
    }

    #[test]
    fn test_bad_timestamp_fails() {
        assert!(matches!(
            parse("not a date|/radio|5| - Song"),
            Err(ParseError::BadTimestamp(_))
        ));
    }
}
