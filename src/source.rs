//! Log source abstraction and a simple in-memory implementation.
//!
//! The storage format, partitioning scheme, and I/O strategy of a real
//! log store belong to the collaborator behind [`LogSource`]; this
//! crate only fixes the contract it must answer: serve a window of raw
//! lines starting at a row offset, report the total row count, and
//! report the partition index of the most recent window.

use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A supplier of raw access-log lines.
pub trait LogSource {
    /// Ordered window of raw lines starting at row offset `start`.
    ///
    /// Lines are returned newline-stripped. An offset at or past the
    /// end yields an empty window.
    fn raw_lines(&mut self, start: u64) -> Result<Vec<String>>;

    /// Total number of rows the source holds.
    fn total_rows(&self) -> u64;

    /// Partition index of the most recently served window.
    ///
    /// `None` until the first window has been served.
    fn current_partition(&self) -> Option<u64>;
}

/// A [`LogSource`] that buffers lines from any [`Read`] input.
///
/// Lines are read once at construction time and served in fixed-size
/// windows of `chunk_size` rows; the partition index of a window is
/// `start / chunk_size`. Blank lines are skipped while buffering.
///
/// # Example
///
/// ```rust
/// use nxcomb::{LineSource, LogSource};
/// use std::io::Cursor;
///
/// let log_data = "127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] \"GET / HTTP/1.1\" 200 612\n";
/// let mut source = LineSource::new(Cursor::new(log_data), 100)?;
///
/// assert_eq!(source.total_rows(), 1);
/// assert_eq!(source.current_partition(), None);
///
/// let window = source.raw_lines(0)?;
/// assert_eq!(window.len(), 1);
/// assert_eq!(source.current_partition(), Some(0));
/// # Ok::<(), nxcomb::Error>(())
/// ```
#[derive(Debug)]
pub struct LineSource {
    lines: Vec<String>,
    chunk_size: usize,
    current_partition: Option<u64>,
}

impl LineSource {
    /// Buffer all lines from `input`, serving windows of `chunk_size`.
    ///
    /// # Errors
    ///
    /// Any I/O failure while reading `input`.
    pub fn new<R: Read>(input: R, chunk_size: usize) -> Result<Self> {
        let mut reader = BufReader::new(input);
        let mut lines = Vec::new();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break; // EOF
            }

            // Remove trailing newline
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            lines.push(line.clone());
        }

        Ok(Self {
            lines,
            chunk_size: chunk_size.max(1),
            current_partition: None,
        })
    }

    /// Open a log file and buffer its lines.
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self> {
        Self::new(File::open(path)?, chunk_size)
    }

    /// The window size in rows.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl LogSource for LineSource {
    fn raw_lines(&mut self, start: u64) -> Result<Vec<String>> {
        self.current_partition = Some(start / self.chunk_size as u64);

        let start = usize::try_from(start).unwrap_or(usize::MAX);
        if start >= self.lines.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(self.chunk_size).min(self.lines.len());
        Ok(self.lines[start..end].to_vec())
    }

    fn total_rows(&self) -> u64 {
        self.lines.len() as u64
    }

    fn current_partition(&self) -> Option<u64> {
        self.current_partition
    }
}
