//! Line parsing for the nginx combined log format.
//!
//! The catalog in [`crate::patterns`] defines the token shapes; this
//! module owns the position knowledge: which occurrence of a shape
//! carries which field, and how the access time is normalized.

use crate::error::{Error, Result};
use crate::patterns::{quote_segments, PatternCatalog};
use crate::record::LogRecord;
use chrono::NaiveDateTime;

/// Input layout of the date-time half of the access-time token.
const TIME_LOCAL_LAYOUT: &str = "%d/%b/%Y:%H:%M:%S";

/// Canonical output layout, 24h, no timezone.
const CANONICAL_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

// Positional contract of the combined format. The quote-delimited
// segment sequence alternates inside/between quotes, so the request
// line is segment 1 and the user agent segment 5; among the
// digit-bearing tokens after the request, the status is token 1 and the
// response time token 4.
const REQUEST_SEGMENT: usize = 1;
const AGENT_SEGMENT: usize = 5;
const STATUS_TOKEN: usize = 1;
const RESPONSE_TIME_TOKEN: usize = 4;

/// Trait for parsing one raw log line into a record.
pub trait ParseLine {
    /// Parse a single newline-stripped log line.
    fn parse_line(&self, line: &str) -> Result<LogRecord>;
}

/// Parser for nginx combined-format access-log lines.
///
/// Each extraction step is independent and individually fault-tolerant:
/// a pattern that finds no match leaves its field unset and never fails
/// the call. The one exception is the access time: a token that matches
/// the expected shape but does not parse as a calendar instant fails the
/// whole parse, because a record without a valid interaction time is
/// unusable downstream. A line with no time token at all still parses.
///
/// # Example
///
/// ```rust
/// use nxcomb::Parser;
///
/// let parser = Parser::new();
/// let record = parser.parse(
///     r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET /index.html HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#,
/// )?;
///
/// assert_eq!(record.ip.as_deref(), Some("127.0.0.1"));
/// assert_eq!(record.timestamp.as_deref(), Some("2015-12-11 11:59:20"));
/// # Ok::<(), nxcomb::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    patterns: PatternCatalog,
}

impl Parser {
    /// Create a parser with the combined-format pattern catalog.
    pub fn new() -> Self {
        Self {
            patterns: PatternCatalog::new(),
        }
    }

    /// Get a reference to the underlying pattern catalog.
    pub fn patterns(&self) -> &PatternCatalog {
        &self.patterns
    }

    /// Parse one raw line into a [`LogRecord`].
    ///
    /// Fields whose pattern finds no match are left as `None`. The
    /// record is returned by value and never mutated afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::TimestampFormat`] if the access-time token matched the
    /// bracket shape but its date-time portion is malformed.
    pub fn parse(&self, line: &str) -> Result<LogRecord> {
        let mut record = LogRecord::new();

        record.ip = self.patterns.find_ip(line).map(str::to_owned);
        record.timestamp = self.normalize_time_local(line)?;

        let segments = quote_segments(line);

        if let Some(request) = segment(&segments, REQUEST_SEGMENT) {
            // Request line is `METHOD PATH PROTOCOL`. A truncated
            // request with a lone method still yields the method.
            let mut tokens = request.split_whitespace();
            record.method = tokens.next().map(str::to_owned);
            record.path = tokens.next().map(str::to_owned);

            let region = after_request(line);
            record.status = self
                .patterns
                .numeric_token(region, STATUS_TOKEN)
                .map(str::to_owned);
            record.response_time_ms = self
                .patterns
                .numeric_token(region, RESPONSE_TIME_TOKEN)
                .map(str::to_owned);
        }

        record.user_agent = segment(&segments, AGENT_SEGMENT).map(str::to_owned);

        Ok(record)
    }

    /// Locate the access-time token and reformat it canonically.
    ///
    /// Returns `Ok(None)` when the line carries no time token; returns
    /// an error only when a token matched the shape but failed to parse.
    fn normalize_time_local(&self, line: &str) -> Result<Option<String>> {
        let Some(token) = self.patterns.find_time_local(line) else {
            return Ok(None);
        };

        // Token looks like `11/Dec/2015:11:59:20 +0000`; the offset
        // half is dropped from the canonical form.
        let date_time = token.split(' ').next().unwrap_or(token);

        match NaiveDateTime::parse_from_str(date_time, TIME_LOCAL_LAYOUT) {
            Ok(parsed) => Ok(Some(parsed.format(CANONICAL_LAYOUT).to_string())),
            Err(source) => {
                tracing::error!(token, "access-time token matched but failed to parse");
                Err(Error::timestamp_format(token, source))
            }
        }
    }
}

impl ParseLine for Parser {
    fn parse_line(&self, line: &str) -> Result<LogRecord> {
        self.parse(line)
    }
}

/// Nth (1-based) quote-delimited segment, bounds-checked.
fn segment<'a>(segments: &[&'a str], ordinal: usize) -> Option<&'a str> {
    segments.get(ordinal.checked_sub(1)?).copied()
}

/// The part of the line after the closing quote of the request segment.
///
/// The status and response-time tokens live here; the IP and time
/// tokens before the request must not be counted as response tokens.
fn after_request(line: &str) -> &str {
    let Some(open) = line.find('"') else {
        return "";
    };
    let rest = &line[open + 1..];
    match rest.find('"') {
        Some(close) => &rest[close + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMBINED_LINE: &str = r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET /index.html HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#;

    #[test]
    fn test_parse_combined_line() {
        let parser = Parser::new();
        let record = parser.parse(COMBINED_LINE).unwrap();

        assert_eq!(record.ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(record.timestamp.as_deref(), Some("2015-12-11 11:59:20"));
        assert_eq!(record.method.as_deref(), Some("GET"));
        assert_eq!(record.path.as_deref(), Some("/index.html"));
        assert_eq!(record.status.as_deref(), Some("200"));
        assert_eq!(record.user_agent.as_deref(), Some("curl/7.29.0"));
        assert_eq!(record.response_time_ms.as_deref(), Some("0.001"));
        assert!(record.is_fully_populated());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = Parser::new();
        let first = parser.parse(COMBINED_LINE).unwrap();
        let second = parser.parse(COMBINED_LINE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_ip_is_not_an_error() {
        let parser = Parser::new();
        let record = parser
            .parse(r#"- - - [11/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#)
            .unwrap();
        assert!(record.ip.is_none());
        assert_eq!(record.status.as_deref(), Some("200"));
    }

    #[test]
    fn test_missing_time_token_is_not_an_error() {
        let parser = Parser::new();
        let record = parser
            .parse(r#"127.0.0.1 - - "GET / HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#)
            .unwrap();
        assert!(record.timestamp.is_none());
        assert_eq!(record.method.as_deref(), Some("GET"));
    }

    #[test]
    fn test_malformed_time_token_is_fatal() {
        let parser = Parser::new();
        let result = parser
            .parse(r#"127.0.0.1 - - [32/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#);
        assert!(matches!(
            result.unwrap_err(),
            Error::TimestampFormat { .. }
        ));
    }

    #[test]
    fn test_agent_is_fifth_segment() {
        let parser = Parser::new();
        let record = parser
            .parse(r#"10.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 12 "-" "Mozilla/5.0" 0.5"#)
            .unwrap();
        assert_eq!(record.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn test_too_few_segments_leaves_agent_unset() {
        // Only the request line is quoted: segment 5 does not exist.
        let parser = Parser::new();
        let record = parser
            .parse(r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 612"#)
            .unwrap();
        assert_eq!(record.method.as_deref(), Some("GET"));
        assert_eq!(record.status.as_deref(), Some("200"));
        assert!(record.user_agent.is_none());
    }

    #[test]
    fn test_too_few_response_tokens_leaves_time_unset() {
        let parser = Parser::new();
        let record = parser
            .parse(r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200"#)
            .unwrap();
        assert_eq!(record.status.as_deref(), Some("200"));
        assert!(record.response_time_ms.is_none());
    }

    #[test]
    fn test_no_request_line_leaves_request_fields_unset() {
        let parser = Parser::new();
        let record = parser
            .parse("127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] 200 612")
            .unwrap();
        assert!(record.method.is_none());
        assert!(record.path.is_none());
        assert!(record.status.is_none());
        assert!(record.response_time_ms.is_none());
        assert_eq!(record.ip.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_method_only_request_leaves_path_unset() {
        let parser = Parser::new();
        let record = parser
            .parse(r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET" 200 612 "-" "curl/7.29.0" 0.001"#)
            .unwrap();
        assert_eq!(record.method.as_deref(), Some("GET"));
        assert!(record.path.is_none());
    }

    #[test]
    fn test_forwarded_ip_does_not_win() {
        let parser = Parser::new();
        let record = parser
            .parse(r#"203.0.113.7 - - [11/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001 "10.0.0.9""#)
            .unwrap();
        assert_eq!(record.ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_matched_but_empty_stays_distinct_from_unmatched() {
        // An empty referer segment keeps the agent at ordinal 5; an
        // empty agent segment is Some(""), not None.
        let parser = Parser::new();
        let record = parser
            .parse(r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 612 "" "" 0.001"#)
            .unwrap();
        assert_eq!(record.user_agent.as_deref(), Some(""));
    }
}
