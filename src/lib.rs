//! # nxcomb - Nginx Combined-Log Record Extraction
//!
//! A Rust library for extracting structured records from nginx access logs
//! in the default *combined* format, one line at a time.
//!
//! This library provides functionality to:
//! - Extract IP, access time, method, path, status, response time, and
//!   user agent from a single raw log line
//! - Normalize the access time to `YYYY-MM-DD HH:MM:SS`
//! - Parse windows of lines from a pluggable log source in batches
//!
//! ## Quick Start
//!
//! ```rust
//! use nxcomb::Parser;
//!
//! let line = r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET /index.html HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#;
//!
//! let parser = Parser::new();
//! let record = parser.parse(line)?;
//!
//! assert_eq!(record.ip.as_deref(), Some("127.0.0.1"));
//! assert_eq!(record.timestamp.as_deref(), Some("2015-12-11 11:59:20"));
//! assert_eq!(record.method.as_deref(), Some("GET"));
//! assert_eq!(record.user_agent.as_deref(), Some("curl/7.29.0"));
//! # Ok::<(), nxcomb::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Best-Effort Extraction**: a field whose pattern finds no match is
//!   left unset, never defaulted, so records distinguish "not matched"
//!   from "matched and empty"
//! - **Fatal Timestamp Validation**: an access-time token that matches
//!   the expected shape but is not a real calendar instant fails the
//!   parse, so no record carries a bogus interaction time
//! - **Batch Interface**: window-by-window extraction over a pluggable
//!   [`LogSource`], with row-count and partition passthrough queries
//! - **Error Handling**: error types using `thiserror`, with `tracing`
//!   events accompanying every fatal propagation
//! - **Optional Serde Support**: serialize/deserialize records when the
//!   `serde` feature is enabled

pub mod batch;
pub mod error;
pub mod parser;
pub mod patterns;
pub mod record;
pub mod source;

// Re-export main types for convenience
pub use batch::BatchReader;
pub use error::{Error, Result};
pub use parser::{ParseLine, Parser};
pub use patterns::{quote_segments, PatternCatalog};
pub use record::LogRecord;
pub use source::{LineSource, LogSource};
