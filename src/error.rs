//! Error types shared by the hashing, routing, and forgery modules.

use thiserror::Error;

use crate::hash::router::Algorithm;

/// Errors reported by this crate.
///
/// Every variant is a deterministic consequence of caller input; none of them
/// is transient, so nothing here is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested algorithm name is unknown, or disabled on this router.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A digest could not be decoded into the expected number of bytes.
    #[error("malformed digest: {reason}")]
    MalformedDigest {
        /// What was wrong with the supplied digest
        reason: String,
    },

    /// A message length is negative, too large, or not block-aligned where it must be.
    #[error("invalid length: {0}")]
    InvalidLength(i128),

    /// The supplied original bytes do not hash to the supplied digest.
    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch {
        /// Digest the caller claimed
        expected: String,
        /// Digest actually computed over the original bytes
        actual: String,
    },

    /// The algorithm does not expose its chaining state through its digest.
    #[error("length extension is not supported for {0}")]
    LengthExtensionUnsupported(Algorithm),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
