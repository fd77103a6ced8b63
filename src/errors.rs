//! Error types.

use std::path::PathBuf;

use crate::key::KeyComponent;

/// Alias for [`core::result::Result`] with the `paeonia` error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Requested key size is outside of the supported range.
    #[error("invalid key size: {bits} bits (supported: {min}..={max})", min = crate::MIN_KEY_SIZE, max = crate::MAX_KEY_SIZE)]
    InvalidKeySize {
        /// The rejected size in bits.
        bits: usize,
    },

    /// The key generation primitive failed.
    #[error("key generation failed: {0}")]
    Generation(#[source] rsa::Error),

    /// The operation needs key material which the instance does not hold.
    #[error("no {0} key material")]
    NoKeyMaterial(KeyComponent),

    /// The key file does not exist.
    #[error("key file not found: {}", path.display())]
    FileNotFound {
        /// Path which was looked up.
        path: PathBuf,
    },

    /// Reading the key file failed for a reason other than its absence.
    #[error("failed to read key file {}: {source}", path.display())]
    Io {
        /// Path which was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not a valid key encoding.
    #[error("parse error: {reason}")]
    Parse {
        /// Human readable description of the failure.
        reason: String,
    },

    /// Encoding the key material failed.
    #[error("encode error: {reason}")]
    Encode {
        /// Human readable description of the failure.
        reason: String,
    },

    /// Unknown output encoding name.
    #[error("unknown encoding: {name:?}")]
    InvalidEncoding {
        /// The rejected name.
        name: String,
    },

    /// Encryption failed.
    #[error("encryption error: {0}")]
    Encryption(#[source] rsa::Error),

    /// Decryption failed.
    #[error("decryption error: {0}")]
    Decryption(#[source] rsa::Error),

    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn parse(reason: impl ToString) -> Self {
        Error::Parse {
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encode(reason: impl ToString) -> Self {
        Error::Encode {
            reason: reason.to_string(),
        }
    }
}
