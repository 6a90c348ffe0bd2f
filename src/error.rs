//! Error types for the nxcomb library.

use thiserror::Error;

/// Result type alias for nxcomb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during log extraction.
///
/// A pattern that simply finds no match is never an error: the field is
/// left unset on the record and extraction continues. Only the two
/// conditions below abort a parse or batch call.
#[derive(Error, Debug)]
pub enum Error {
    /// Error when the bracketed access-time token matched the expected
    /// shape but its date-time portion is not a valid calendar instant.
    #[error("timestamp token '{token}' does not parse as dd/Mon/yyyy:HH:mm:ss: {source}")]
    TimestampFormat {
        token: String,
        #[source]
        source: chrono::ParseError,
    },

    /// IO error when the log source fails to supply raw lines.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new timestamp format error.
    pub fn timestamp_format(token: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::TimestampFormat {
            token: token.into(),
            source,
        }
    }
}
