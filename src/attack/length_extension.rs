//! # MD4 length-extension forgery
//!
//! An MD4 digest is the chaining state left after the padded message was consumed. Anyone
//! holding `MD4(M)` and `len(M)` can therefore load that state into a fresh session, account
//! for the `M ‖ glue` bytes it stands for, and keep hashing. The result equals what an
//! honest party with `M` in hand would get for `M ‖ glue ‖ suffix`, without `M` ever being
//! seen.
//!
//! The engine cannot tell whether a digest/length pair is genuine. A mismatched pair still
//! produces a well-formed forgery; it just does not correspond to any real message.

use crate::error::{Error, Result};
use crate::hash::decode_digest;
use crate::hash::md4::{md4_digest, ChainingState, Md4, MD4_OUTPUT_SIZE};
use crate::hash::padding::padding_for;

/// Largest original message length accepted, in bytes (bit length must fit in 64 bits).
pub const MAX_MESSAGE_LEN: u64 = (1 << 61) - 1;

/// Outcome of a length-extension forgery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeryResult {
    original_hash: [u8; MD4_OUTPUT_SIZE],
    forged_message: Vec<u8>,
    forged_hash: [u8; MD4_OUTPUT_SIZE],
    includes_original: bool,
}

impl ForgeryResult {
    /// Digest of the original message, as supplied or computed.
    pub fn original_hash(&self) -> &[u8; MD4_OUTPUT_SIZE] {
        &self.original_hash
    }

    /// Lowercase hex of [`original_hash`](Self::original_hash).
    pub fn original_hex(&self) -> String {
        hex::encode(self.original_hash)
    }

    /// The extended message: `original ‖ glue ‖ suffix` when the original bytes were
    /// available, otherwise `glue ‖ suffix`.
    pub fn forged_message(&self) -> &[u8] {
        &self.forged_message
    }

    /// Digest of the full extended message.
    pub fn forged_hash(&self) -> &[u8; MD4_OUTPUT_SIZE] {
        &self.forged_hash
    }

    /// Lowercase hex of [`forged_hash`](Self::forged_hash).
    pub fn forged_hex(&self) -> String {
        hex::encode(self.forged_hash)
    }

    /// Whether [`forged_message`](Self::forged_message) starts with the original bytes.
    pub fn includes_original(&self) -> bool {
        self.includes_original
    }

    /// `prefix ‖ forged_message`, for a result built without the original bytes.
    pub fn with_prefix(&self, prefix: &[u8]) -> Vec<u8> {
        let mut message = Vec::with_capacity(prefix.len() + self.forged_message.len());
        message.extend_from_slice(prefix);
        message.extend_from_slice(&self.forged_message);
        message
    }

    /// Consumes the result, returning the extended message.
    pub fn into_message(self) -> Vec<u8> {
        self.forged_message
    }
}

/// Forges `MD4(M ‖ glue ‖ suffix)` from the hex digest of `M` and its length.
///
/// The returned message is `glue ‖ suffix`; the caller prepends the real `M`.
///
/// # Errors
/// [`Error::MalformedDigest`] unless `original_digest` is 32 hex characters, and
/// [`Error::InvalidLength`] when `original_length` is negative or above [`MAX_MESSAGE_LEN`].
pub fn forge(
    original_digest: &str,
    original_length: i64,
    suffix: &[u8],
) -> Result<ForgeryResult> {
    let digest = parse_digest(original_digest)?;
    let length = u64::try_from(original_length)
        .map_err(|_| Error::InvalidLength(original_length.into()))?;
    check_length(length)?;
    forge_tail(digest, length, suffix)
}

/// Same as [`forge`], over a raw 16-byte digest.
pub fn forge_bytes(
    original_digest: &[u8],
    original_length: u64,
    suffix: &[u8],
) -> Result<ForgeryResult> {
    let digest: [u8; MD4_OUTPUT_SIZE] =
        original_digest
            .try_into()
            .map_err(|_| Error::MalformedDigest {
                reason: format!("expected {MD4_OUTPUT_SIZE} bytes, got {}", original_digest.len()),
            })?;
    check_length(original_length)?;
    forge_tail(digest, original_length, suffix)
}

/// Forges an extension of a message the caller does have, after checking it really hashes
/// to `original_digest`. The returned message is `original ‖ glue ‖ suffix`.
///
/// # Errors
/// [`Error::MalformedDigest`] for a bad digest and [`Error::DigestMismatch`] when
/// `MD4(original)` differs from it.
pub fn forge_with_original(
    original_digest: &str,
    original: &[u8],
    suffix: &[u8],
) -> Result<ForgeryResult> {
    let expected = parse_digest(original_digest)?;
    let actual = md4_digest(original);
    if actual != expected {
        return Err(Error::DigestMismatch {
            expected: hex::encode(expected),
            actual: hex::encode(actual),
        });
    }
    forge_full(actual, original, suffix)
}

/// Hashes `original` and forges an extension of it with `suffix`.
///
/// The forgery still goes through the digest alone; `original` only supplies the digest
/// and the leading bytes of the returned message.
pub fn forge_message(original: &[u8], suffix: &[u8]) -> Result<ForgeryResult> {
    forge_full(md4_digest(original), original, suffix)
}

fn parse_digest(original_digest: &str) -> Result<[u8; MD4_OUTPUT_SIZE]> {
    let bytes = decode_digest(original_digest, MD4_OUTPUT_SIZE)?;
    let mut digest = [0u8; MD4_OUTPUT_SIZE];
    digest.copy_from_slice(&bytes);
    Ok(digest)
}

fn check_length(length: u64) -> Result<()> {
    if length > MAX_MESSAGE_LEN {
        return Err(Error::InvalidLength(length.into()));
    }
    Ok(())
}

fn forge_full(
    original_hash: [u8; MD4_OUTPUT_SIZE],
    original: &[u8],
    suffix: &[u8],
) -> Result<ForgeryResult> {
    let length = original.len() as u64;
    check_length(length)?;
    let (glue, forged_hash) = extend(&original_hash, length, suffix)?;

    let mut forged_message = Vec::with_capacity(original.len() + glue.len() + suffix.len());
    forged_message.extend_from_slice(original);
    forged_message.extend_from_slice(&glue);
    forged_message.extend_from_slice(suffix);

    Ok(ForgeryResult {
        original_hash,
        forged_message,
        forged_hash,
        includes_original: true,
    })
}

fn forge_tail(
    original_hash: [u8; MD4_OUTPUT_SIZE],
    original_length: u64,
    suffix: &[u8],
) -> Result<ForgeryResult> {
    let (mut forged_message, forged_hash) = extend(&original_hash, original_length, suffix)?;
    forged_message.extend_from_slice(suffix);

    Ok(ForgeryResult {
        original_hash,
        forged_message,
        forged_hash,
        includes_original: false,
    })
}

/// Returns the glue padding and the digest of `M ‖ glue ‖ suffix`.
fn extend(
    original_hash: &[u8; MD4_OUTPUT_SIZE],
    original_length: u64,
    suffix: &[u8],
) -> Result<(Vec<u8>, [u8; MD4_OUTPUT_SIZE])> {
    let glue = padding_for(original_length);
    let consumed = original_length + glue.len() as u64;
    log::debug!(
        "extending md4 digest: original_length={original_length}, glue={}, suffix={}",
        glue.len(),
        suffix.len()
    );

    let mut session = Md4::from_state(ChainingState::from_digest(original_hash), consumed)?;
    session.update(suffix);
    Ok((glue, session.finalize()))
}
