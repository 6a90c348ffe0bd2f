//! Shape patterns for the nginx combined log format.
//!
//! The combined format repeats token shapes (quoted strings, bare
//! numeric tokens) at fixed but not syntactically distinguishable
//! positions. This module defines the shapes once; the parser owns the
//! knowledge of which occurrence of a shape carries which field.

use regex::Regex;

/// The compiled shape patterns of a combined-format access-log line.
///
/// Compiled once and reused for every line; the patterns are immutable
/// and safe to share across repeated calls.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    /// Dotted-quad IP literal.
    ip: Regex,
    /// Bracketed access-time token, e.g. `11/Dec/2015:11:59:20 +0000`.
    /// Shape only: out-of-range calendar values still match here and are
    /// rejected later when the token is actually parsed.
    time_local: Regex,
    /// Whitespace-delimited token containing at least one digit. Scanned
    /// over the part of the line following the request segment.
    numeric_token: Regex,
}

impl PatternCatalog {
    /// Compile the catalog.
    pub fn new() -> Self {
        Self {
            ip: Regex::new(r"\d{1,3}(?:\.\d{1,3}){3}").unwrap(),
            time_local: Regex::new(r"\d{2}/[A-Za-z]{3}/\d{4}:\d{2}:\d{2}:\d{2}(?: [+-]\d{4})?")
                .unwrap(),
            numeric_token: Regex::new(r"\S*\d\S*").unwrap(),
        }
    }

    /// First IP literal in the line.
    ///
    /// Only the first occurrence is authoritative: a line may carry a
    /// second IP (e.g. inside an `X-Forwarded-For` value) that must not
    /// win over the client address.
    pub fn find_ip<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.ip.find(line).map(|m| m.as_str())
    }

    /// First access-time token in the line, timezone offset included.
    pub fn find_time_local<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.time_local.find(line).map(|m| m.as_str())
    }

    /// Nth (1-based) digit-bearing token within `region`.
    pub fn numeric_token<'a>(&self, region: &'a str, ordinal: usize) -> Option<&'a str> {
        self.numeric_token
            .find_iter(region)
            .nth(ordinal.checked_sub(1)?)
            .map(|m| m.as_str())
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a line into its quote-delimited segments in one pass.
///
/// The returned slice alternates between inside-quotes and
/// between-quotes text: for `a "b" c "d" e` it yields
/// `["b", " c ", "d"]`. The prefix before the first quote and the
/// suffix after the last are not segments. Odd 1-based ordinals are
/// quoted contents with the quotes already stripped; even ordinals are
/// the gaps between quoted spans.
pub fn quote_segments(line: &str) -> Vec<&str> {
    let parts: Vec<&str> = line.split('"').collect();
    if parts.len() < 3 {
        // Fewer than two quote characters: nothing is delimited.
        return Vec::new();
    }
    parts[1..parts.len() - 1].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_first_match_wins() {
        let catalog = PatternCatalog::new();
        let line = r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 612 "-" "-" "10.0.0.9""#;
        assert_eq!(catalog.find_ip(line), Some("127.0.0.1"));
    }

    #[test]
    fn test_ip_requires_four_components() {
        let catalog = PatternCatalog::new();
        assert_eq!(catalog.find_ip(r#""curl/7.29.0""#), None);
    }

    #[test]
    fn test_time_local_shape() {
        let catalog = PatternCatalog::new();
        let line = "[11/Dec/2015:11:59:20 +0000]";
        assert_eq!(
            catalog.find_time_local(line),
            Some("11/Dec/2015:11:59:20 +0000")
        );
    }

    #[test]
    fn test_time_local_shape_accepts_invalid_calendar_day() {
        // Day 32 passes the shape check; calendar validation is the
        // parser's job.
        let catalog = PatternCatalog::new();
        assert_eq!(
            catalog.find_time_local("[32/Dec/2015:11:59:20 +0000]"),
            Some("32/Dec/2015:11:59:20 +0000")
        );
    }

    #[test]
    fn test_time_local_offset_is_optional() {
        let catalog = PatternCatalog::new();
        assert_eq!(
            catalog.find_time_local("[11/Dec/2015:11:59:20]"),
            Some("11/Dec/2015:11:59:20")
        );
    }

    #[test]
    fn test_quote_segments_alternate() {
        let segments = quote_segments(r#"x "req" 200 "ref" "agent" 0.1"#);
        assert_eq!(segments, vec!["req", " 200 ", "ref", " ", "agent"]);
    }

    #[test]
    fn test_quote_segments_empty_without_quotes() {
        assert!(quote_segments("no quotes here").is_empty());
        assert!(quote_segments(r#"one " quote"#).is_empty());
    }

    #[test]
    fn test_numeric_token_ordinals() {
        let catalog = PatternCatalog::new();
        let region = r#" 200 612 "-" "curl/7.29.0" 0.001"#;
        assert_eq!(catalog.numeric_token(region, 1), Some("200"));
        assert_eq!(catalog.numeric_token(region, 2), Some("612"));
        assert_eq!(catalog.numeric_token(region, 3), Some(r#""curl/7.29.0""#));
        assert_eq!(catalog.numeric_token(region, 4), Some("0.001"));
        assert_eq!(catalog.numeric_token(region, 5), None);
    }
}
