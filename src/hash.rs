//! Message digest implementations.
//!
//! This module provides:
//! - MD4 (RFC 1320), implemented from scratch with an inspectable, resumable session
//! - The MD4 padding rule, as a pure function of message length
//! - A router that dispatches digest requests by algorithm name
//!
//! MD2, MD5 and SHA-1 are not implemented here; the router obtains them from the
//! RustCrypto crates and treats them as opaque.
//!
//! # Examples
//!
//! ```rust
//! use hashforge::hash::{md4_digest, HashRouter};
//!
//! assert_eq!(hex::encode(md4_digest(b"abc")), "a448017aaf21d8525fc10ae87aa6729d");
//!
//! let router = HashRouter::new();
//! assert_eq!(router.compute("MD4", b"abc")?, "a448017aaf21d8525fc10ae87aa6729d");
//! # Ok::<(), hashforge::Error>(())
//! ```

use crate::error::{Error, Result};

/// The capability every routed algorithm provides: digest a byte slice.
pub trait HashFunction {
    /// Canonical upper-case name, e.g. `"MD4"`.
    fn name(&self) -> &'static str;

    /// Digest size in bytes.
    fn output_size(&self) -> usize;

    /// Compute the digest of `data`.
    fn digest(&self, data: &[u8]) -> Vec<u8>;

    /// Compute the digest of `data` as lowercase hex.
    fn hex_digest(&self, data: &[u8]) -> String {
        hex::encode(self.digest(data))
    }
}

/// Decodes a hex digest and checks it has exactly `expected_len` bytes.
///
/// Surrounding whitespace is ignored and either case is accepted.
pub(crate) fn decode_digest(digest: &str, expected_len: usize) -> Result<Vec<u8>> {
    let bytes = hex::decode(digest.trim()).map_err(|e| Error::MalformedDigest {
        reason: e.to_string(),
    })?;
    if bytes.len() != expected_len {
        return Err(Error::MalformedDigest {
            reason: format!("expected {expected_len} bytes, got {}", bytes.len()),
        });
    }
    Ok(bytes)
}

pub mod md4;
pub mod padding;
pub mod router;

// Re-export MD4 functionality
pub use md4::{md4_digest, ChainingState, Md4, MD4_OUTPUT_SIZE};

// Re-export padding functionality
pub use padding::{padded_len, padding_for, zero_fill_len, BLOCK_SIZE};

// Re-export routing functionality
pub use router::{compute, Algorithm, HashRouter, HashRouterBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_digest_accepts_either_case() {
        let lower = decode_digest("31d6cfe0d16ae931b73c59d7e0c089c0", 16).unwrap();
        let upper = decode_digest(" 31D6CFE0D16AE931B73C59D7E0C089C0\n", 16).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_decode_digest_rejects_bad_input() {
        assert!(matches!(
            decode_digest("31d6cfe0d16ae931b73c59d7e0c089c0x", 16),
            Err(Error::MalformedDigest { .. })
        ));
        assert!(matches!(
            decode_digest("zz", 1),
            Err(Error::MalformedDigest { .. })
        ));
        assert!(matches!(
            decode_digest("31d6cfe0", 16),
            Err(Error::MalformedDigest { .. })
        ));
    }
}
