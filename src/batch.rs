//! Batch extraction over a log source.

use crate::error::Result;
use crate::parser::{ParseLine, Parser};
use crate::record::LogRecord;
use crate::source::LogSource;

/// Parses windows of raw lines from a [`LogSource`] into records.
///
/// One adapter serves one caller: it keeps the most recent successful
/// batch as its only state, overwritten on every call. Row count and
/// partition index are answered by the source directly, independent of
/// how many batches have been parsed.
///
/// # Example
///
/// ```rust
/// use nxcomb::{BatchReader, LineSource};
/// use std::io::Cursor;
///
/// let log_data = r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET /index.html HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#;
/// let source = LineSource::new(Cursor::new(log_data), 100)?;
/// let mut batch = BatchReader::new(source);
///
/// let records = batch.parse_batch(0)?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].status.as_deref(), Some("200"));
/// # Ok::<(), nxcomb::Error>(())
/// ```
#[derive(Debug)]
pub struct BatchReader<S: LogSource> {
    source: S,
    parser: Parser,
    last_batch: Vec<LogRecord>,
}

impl<S: LogSource> BatchReader<S> {
    /// Create a batch reader with the default combined-format parser.
    pub fn new(source: S) -> Self {
        Self::with_parser(source, Parser::new())
    }

    /// Create a batch reader with a pre-configured parser.
    pub fn with_parser(source: S, parser: Parser) -> Self {
        Self {
            source,
            parser,
            last_batch: Vec::new(),
        }
    }

    /// Get a reference to the underlying parser.
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Fetch the window starting at `start` and parse it in order.
    ///
    /// The whole batch fails on the first line whose access-time token
    /// is malformed, and on any source failure; a failed call leaves
    /// the previous successful batch in place.
    ///
    /// # Errors
    ///
    /// [`crate::Error::TimestampFormat`] from a poisoned line, or the
    /// source's error, both propagated unchanged.
    pub fn parse_batch(&mut self, start: u64) -> Result<&[LogRecord]> {
        let lines = match self.source.raw_lines(start) {
            Ok(lines) => lines,
            Err(error) => {
                tracing::error!(start, %error, "log source failed to supply lines");
                return Err(error);
            }
        };

        let mut records = Vec::with_capacity(lines.len());
        for line in &lines {
            match self.parser.parse_line(line) {
                Ok(record) => records.push(record),
                Err(error) => {
                    tracing::error!(start, %error, "aborting batch on unparsable line");
                    return Err(error);
                }
            }
        }

        self.last_batch = records;
        Ok(&self.last_batch)
    }

    /// The most recent successful batch, empty before the first one.
    pub fn last_batch(&self) -> &[LogRecord] {
        &self.last_batch
    }

    /// Total row count, answered by the source.
    pub fn total_rows(&self) -> u64 {
        self.source.total_rows()
    }

    /// Partition index of the most recent window, answered by the
    /// source; `None` until a batch has been requested.
    pub fn current_partition(&self) -> Option<u64> {
        self.source.current_partition()
    }
}
