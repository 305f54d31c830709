//! Attacks on the hash constructions in [`crate::hash`].
//!
//! Currently implemented:
//! - MD4 length extension: from `MD4(secret)` and `len(secret)` alone, compute
//!   `MD4(secret ‖ glue ‖ suffix)` for any suffix
//!
//! # Examples
//!
//! ```rust
//! use hashforge::attack::forge;
//! use hashforge::hash::{md4_digest, padding_for};
//!
//! let secret = b"only the server knows this";
//! let digest = hex::encode(md4_digest(secret));
//!
//! let forgery = forge(&digest, secret.len() as i64, b";admin=true")?;
//!
//! let mut full = secret.to_vec();
//! full.extend(padding_for(secret.len() as u64));
//! full.extend_from_slice(b";admin=true");
//! assert_eq!(forgery.forged_hash(), &md4_digest(&full));
//! # Ok::<(), hashforge::Error>(())
//! ```

pub mod length_extension;

// Re-export length extension functionality
pub use length_extension::{
    forge, forge_bytes, forge_message, forge_with_original, ForgeryResult, MAX_MESSAGE_LEN,
};
