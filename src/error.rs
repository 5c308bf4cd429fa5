use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot access {}: {source}", .path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("invalid padding {0}, expected a value in [0, 7]")]
    InvalidPadding(u8),
    /// The bitstream ran out before every symbol was decoded, either mid-path
    /// through the tree or at the root.
    #[error("truncated bitstream: decoded {decoded} of {expected} symbols")]
    TruncatedBitstream { decoded: u64, expected: u64 },
    #[error("bitstream holds {remaining_bits} bits past the {expected} declared symbols")]
    LengthMismatch { expected: u64, remaining_bits: usize },
    #[error("byte {symbol:#04x} occurs {count} times, more than a frequency entry can hold")]
    InputTooLarge { symbol: u8, count: u64 },
    #[error("no code assigned to byte {0:#04x}")]
    MissingCode(u8),
    #[error("properties file: {0}")]
    Properties(String),
    #[error("json summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::IoUnavailable { path: path.into(), source }
    }
}
