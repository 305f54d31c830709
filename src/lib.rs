//! MD4 from scratch, plus the length-extension forgery its digest makes possible.
//!
//! - [`hash`]: the MD4 session and padding rule, and a router that digests bytes under a
//!   named algorithm (MD2, MD4, MD5, SHA-1)
//! - [`attack`]: MD4 length extension from a digest and a length alone
//!
//! DISCLAIMER: MD4 is broken. This crate exists to demonstrate how; do not use it to
//! protect anything.

pub mod attack;
pub mod error;
pub mod hash;

pub use attack::{forge, ForgeryResult};
pub use error::{Error, Result};
pub use hash::{compute, md4_digest, padding_for, Algorithm, HashFunction, HashRouter, Md4};
