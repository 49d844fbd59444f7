use crate::parser::traits::{LineParser, LogEntry, LogFormat, ParseError};
use crate::parser::model::AccessEntry;
use crate::parser::timestamp;

/// Parser for Icecast access logs.
///
/// The format is Combined Log Format with a trailing listen duration:
///
/// `127.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /test.mp3 HTTP/1.0" 200 3380454 "http://example.com/" "Mozilla/5.0" 105`
///
/// Any structural mismatch (missing bracket or quote, non-numeric
/// status/size/duration, truncated line) rejects the whole line.
pub struct AccessLogParser;

impl LineParser for AccessLogParser {
    fn parse(&self, line: &str) -> Result<LogEntry, ParseError> {
        let text = line.trim();
        let mut rest = text;

        // host - ident [date] "request" status size "referer" "agent" duration
        let ip = take_token(&mut rest)
            .ok_or_else(|| ParseError::InvalidFormat("Empty line".into()))?;

        let dash = take_token(&mut rest)
            .ok_or_else(|| ParseError::InvalidFormat("Truncated before ident".into()))?;
        if dash != "-" {
            return Err(ParseError::InvalidFormat("Second field is not \"-\"".into()));
        }

        // The authenticated-user token ("frank") is matched but discarded.
        take_token(&mut rest)
            .ok_or_else(|| ParseError::InvalidFormat("Missing ident field".into()))?;

        let stamp = take_bracketed(&mut rest)?;
        let date = timestamp::parse_millis(stamp)?;

        let request = take_quoted(&mut rest)?;
        let (method, url, protocol) = split_request(request);

        let status: i32 = take_number(&mut rest)?;
        let size: i64 = take_number(&mut rest)?;

        let referer = placeholder(take_quoted(&mut rest)?);
        let agent = placeholder(take_quoted(&mut rest)?);

        let duration: i64 = take_number(&mut rest)?;
        // Anything after the duration field is ignored.

        Ok(LogEntry::Access(AccessEntry {
            ip: ip.to_string(),
            date,
            method,
            url,
            protocol,
            status,
            size,
            referer,
            agent,
            duration,
        }))
    }

    fn format(&self) -> LogFormat {
        LogFormat::Access
    }
}

/// Split the quoted request string into (method, url, protocol).
///
/// - 3+ tokens: method, url, protocol (extra tokens ignored)
/// - exactly 2: method, url, empty protocol
/// - 0 or 1: empty method, the whole request string as url, empty protocol
fn split_request(request: &str) -> (String, String, String) {
    let parts: Vec<&str> = request.split(' ').collect();
    match parts.len() {
        n if n > 2 => (parts[0].to_string(), parts[1].to_string(), parts[2].to_string()),
        2 => (parts[0].to_string(), parts[1].to_string(), String::new()),
        _ => (String::new(), request.to_string(), String::new()),
    }
}

/// Map the literal `-` placeholder to an absent value.
fn placeholder(field: &str) -> Option<String> {
    if field == "-" {
        None
    } else {
        Some(field.to_string())
    }
}

/// Take the next whitespace-delimited token, advancing `rest` past it.
fn take_token<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (token, tail) = trimmed.split_at(end);
    *rest = tail;
    Some(token)
}

/// Take the next `[...]`-enclosed segment, advancing `rest` past it.
fn take_bracketed<'a>(rest: &mut &'a str) -> Result<&'a str, ParseError> {
    let trimmed = rest.trim_start();
    let inner = trimmed
        .strip_prefix('[')
        .ok_or_else(|| ParseError::InvalidFormat("Missing timestamp bracket".into()))?;
    let close = inner
        .find(']')
        .ok_or_else(|| ParseError::InvalidFormat("Unterminated timestamp bracket".into()))?;
    *rest = &inner[close + 1..];
    Ok(&inner[..close])
}

/// Take the next quoted string, advancing `rest` past the closing quote.
///
/// The grammar does not use escape sequences; the field ends at the first
/// `"` after the opening one.
fn take_quoted<'a>(rest: &mut &'a str) -> Result<&'a str, ParseError> {
    let trimmed = rest.trim_start();
    let inner = trimmed
        .strip_prefix('"')
        .ok_or_else(|| ParseError::InvalidFormat("Missing opening quote".into()))?;
    let close = inner
        .find('"')
        .ok_or_else(|| ParseError::InvalidFormat("Unterminated quoted field".into()))?;
    *rest = &inner[close + 1..];
    Ok(&inner[..close])
}

/// Take the next token and parse it as a digits-only decimal integer.
fn take_number<T: std::str::FromStr>(rest: &mut &str) -> Result<T, ParseError> {
    let token = take_token(rest)
        .ok_or_else(|| ParseError::InvalidFormat("Truncated numeric field".into()))?;
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::BadNumber(token.to_string()));
    }
    token
        .parse::<T>()
        .map_err(|_| ParseError::BadNumber(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<AccessEntry, ParseError> {
        AccessLogParser.parse(line).map(|entry| match entry {
            LogEntry::Access(access) => access,
            other => panic!("unexpected entry kind: {:?}", other),
        })
    }

    #[test]
    fn test_parse_with_referer() {
        let line = r#"127.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /test.mp3 HTTP/1.0" 200 3380454 "http://example.com/" "Mozilla/5.0" 105"#;
        let entry = parse(line).unwrap();
        assert_eq!(entry, AccessEntry {
            ip: "127.0.0.1".to_string(),
            date: 1434729525000,
            method: "GET".to_string(),
            url: "/test.mp3".to_string(),
            protocol: "HTTP/1.0".to_string(),
            status: 200,
            size: 3380454,
            referer: Some("http://example.com/".to_string()),
            agent: Some("Mozilla/5.0".to_string()),
            duration: 105,
        });
    }

    #[test]
    fn test_parse_without_referer() {
        let line = r#"127.0.0.1 - - [19/Jun/2015:18:58:31 +0300] "GET /test.mp3 HTTP/1.0" 302 170 "-" "Mozilla/5.0 (Windows NT 5.1)" 0"#;
        let entry = parse(line).unwrap();
        assert_eq!(entry.date, 1434729511000);
        assert_eq!(entry.status, 302);
        assert_eq!(entry.size, 170);
        assert_eq!(entry.referer, None);
        assert_eq!(entry.agent, Some("Mozilla/5.0 (Windows NT 5.1)".to_string()));
        assert_eq!(entry.duration, 0);
    }

    #[test]
    fn test_parse_with_frank() {
        let line = r#"127.0.0.1 - admin [19/Jun/2015:18:58:31 +0300] "GET /test.mp3 HTTP/1.0" 302 170 "-" "curl/7.68.0" 0"#;
        let entry = parse(line).unwrap();
        // The authenticated-user token is discarded
        assert_eq!(entry.ip, "127.0.0.1");
        assert_eq!(entry.url, "/test.mp3");
    }

    #[test]
    fn test_agent_placeholder_absent() {
        let line = r#"10.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /a HTTP/1.1" 200 1 "-" "-" 7"#;
        let entry = parse(line).unwrap();
        assert_eq!(entry.referer, None);
        assert_eq!(entry.agent, None);
    }

    #[test]
    fn test_agent_preserved_verbatim() {
        let agent = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";
        let line = format!(
            r#"10.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /a HTTP/1.1" 200 1 "-" "{}" 7"#,
            agent
        );
        assert_eq!(parse(&line).unwrap().agent.as_deref(), Some(agent));
    }

    #[test]
    fn test_request_with_two_tokens() {
        let line = r#"10.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /a" 200 1 "-" "-" 7"#;
        let entry = parse(line).unwrap();
        assert_eq!(entry.method, "GET");
        assert_eq!(entry.url, "/a");
        assert_eq!(entry.protocol, "");
    }

    #[test]
    fn test_request_with_one_token() {
        let line = r#"10.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "/a" 200 1 "-" "-" 7"#;
        let entry = parse(line).unwrap();
        assert_eq!(entry.method, "");
        assert_eq!(entry.url, "/a");
        assert_eq!(entry.protocol, "");
    }

    #[test]
    fn test_request_with_extra_tokens() {
        let line = r#"10.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /a HTTP/1.1 junk" 200 1 "-" "-" 7"#;
        let entry = parse(line).unwrap();
        assert_eq!(entry.method, "GET");
        assert_eq!(entry.url, "/a");
        assert_eq!(entry.protocol, "HTTP/1.1");
    }

    #[test]
    fn test_truncated_line_fails() {
        let line = r#"127.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GE"#;
        assert!(parse(line).is_err());
    }

    #[test]
    fn test_bad_timestamp_fails() {
        let line = r#"127.0.0.1 - - [not a date] "GET /a HTTP/1.1" 200 1 "-" "-" 7"#;
        assert!(matches!(parse(line), Err(ParseError::BadTimestamp(_))));
    }

    #[test]
    fn test_non_numeric_status_fails() {
        let line = r#"127.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /a HTTP/1.1" OK 1 "-" "-" 7"#;
        assert!(matches!(parse(line), Err(ParseError::BadNumber(_))));
    }

    #[test]
    fn test_missing_bracket_fails() {
        let line = r#"127.0.0.1 - - 19/Jun/2015:18:58:45 +0300 "GET /a HTTP/1.1" 200 1 "-" "-" 7"#;
        assert!(matches!(parse(line), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_trailing_content_ignored() {
        let line = r#"10.0.0.1 - - [19/Jun/2015:18:58:45 +0300] "GET /a HTTP/1.1" 200 1 "-" "-" 7 extra"#;
        assert_eq!(parse(line).unwrap().duration, 7);
    }
}
