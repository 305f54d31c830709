//! # Digest routing by algorithm name
//!
//! Callers name an algorithm as a string ("md4", "SHA1", ...) and hand over bytes. The router
//! resolves the name once, case-insensitively, into an [`Algorithm`] and every later decision
//! is an exhaustive `match` on that enum. An unknown name is an
//! [`Error::UnsupportedAlgorithm`], never a string that could be mistaken for a digest.
//!
//! MD4 is served by [`md4_digest`]; MD2, MD5 and SHA-1 come from the RustCrypto `md2`,
//! `md-5` and `sha1` crates through the `digest::Digest` trait.
//!
//! ## Configuration
//! [`HashRouterBuilder`] selects which algorithms a router will serve. By default all of
//! them are enabled.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use digest::Digest;

use crate::attack::length_extension::{self, ForgeryResult};
use crate::error::{Error, Result};
use crate::hash::md4::md4_digest;
use crate::hash::{decode_digest, HashFunction};

/// The digest algorithms the router knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    /// MD2 (RFC 1319), external
    Md2,
    /// MD4 (RFC 1320), implemented in this crate
    Md4,
    /// MD5 (RFC 1321), external
    Md5,
    /// SHA-1 (FIPS 180-4), external
    Sha1,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Md2,
        Algorithm::Md4,
        Algorithm::Md5,
        Algorithm::Sha1,
    ];

    /// Whether the digest exposes the full chaining state, making length extension possible
    /// with this crate's forgery engine.
    pub fn supports_length_extension(self) -> bool {
        match self {
            Algorithm::Md4 => true,
            // MD5 and SHA-1 are vulnerable in principle, but their internals are opaque here
            Algorithm::Md2 | Algorithm::Md5 | Algorithm::Sha1 => false,
        }
    }
}

impl HashFunction for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Algorithm::Md2 => "MD2",
            Algorithm::Md4 => "MD4",
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA1",
        }
    }

    fn output_size(&self) -> usize {
        match self {
            Algorithm::Md2 | Algorithm::Md4 | Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
        }
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Algorithm::Md2 => md2::Md2::digest(data).to_vec(),
            Algorithm::Md4 => md4_digest(data).to_vec(),
            Algorithm::Md5 => md5::Md5::digest(data).to_vec(),
            Algorithm::Sha1 => sha1::Sha1::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md2" => Ok(Algorithm::Md2),
            "md4" => Ok(Algorithm::Md4),
            "md5" => Ok(Algorithm::Md5),
            "sha1" | "sha-1" => Ok(Algorithm::Sha1),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// A builder for [`HashRouter`], choosing which algorithms it serves.
#[derive(Debug, Clone)]
pub struct HashRouterBuilder {
    enabled: BTreeSet<Algorithm>,
}

impl Default for HashRouterBuilder {
    fn default() -> Self {
        Self {
            enabled: Algorithm::ALL.into_iter().collect(),
        }
    }
}

impl HashRouterBuilder {
    /// Create a new builder with every algorithm enabled.
    pub fn new() -> Self {
        Default::default()
    }

    /// Serve `algorithm`.
    pub fn enable(mut self, algorithm: Algorithm) -> Self {
        self.enabled.insert(algorithm);
        self
    }

    /// Stop serving `algorithm`; requests for it fail as unsupported.
    pub fn disable(mut self, algorithm: Algorithm) -> Self {
        self.enabled.remove(&algorithm);
        self
    }

    /// Serve exactly the given algorithms.
    pub fn only(mut self, algorithms: &[Algorithm]) -> Self {
        self.enabled = algorithms.iter().copied().collect();
        self
    }

    /// Builds the router.
    pub fn build(self) -> HashRouter {
        HashRouter {
            enabled: self.enabled,
        }
    }
}

/// Dispatches digest and forgery requests by algorithm name.
#[derive(Debug, Clone)]
pub struct HashRouter {
    enabled: BTreeSet<Algorithm>,
}

impl Default for HashRouter {
    fn default() -> Self {
        HashRouterBuilder::default().build()
    }
}

impl HashRouter {
    /// A router serving every algorithm.
    pub fn new() -> Self {
        Default::default()
    }

    /// Start configuring a router.
    pub fn builder() -> HashRouterBuilder {
        HashRouterBuilder::new()
    }

    /// Algorithms this router serves, in a stable order.
    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.enabled.iter().copied()
    }

    /// Resolves `name` to an enabled algorithm.
    pub fn resolve(&self, name: &str) -> Result<Algorithm> {
        let algorithm: Algorithm = name.parse()?;
        if !self.enabled.contains(&algorithm) {
            log::debug!("algorithm {algorithm} is disabled on this router");
            return Err(Error::UnsupportedAlgorithm(name.to_string()));
        }
        Ok(algorithm)
    }

    /// Raw digest of `data` under the named algorithm.
    pub fn digest(&self, name: &str, data: &[u8]) -> Result<Vec<u8>> {
        let algorithm = self.resolve(name)?;
        log::debug!("computing {algorithm} over {} bytes", data.len());
        Ok(algorithm.digest(data))
    }

    /// Lowercase hex digest of `data` under the named algorithm.
    pub fn compute(&self, name: &str, data: &[u8]) -> Result<String> {
        self.digest(name, data).map(hex::encode)
    }

    /// Recomputes the digest of `data` and compares it with `expected` (hex, either case).
    pub fn verify(&self, name: &str, data: &[u8], expected: &str) -> Result<bool> {
        let algorithm = self.resolve(name)?;
        let expected = decode_digest(expected, algorithm.output_size())?;
        Ok(algorithm.digest(data) == expected)
    }

    /// Forges a length extension of a message known only by its digest and length.
    ///
    /// Only algorithms whose digest is their whole chaining state are accepted; see
    /// [`Algorithm::supports_length_extension`].
    pub fn forge(
        &self,
        name: &str,
        original_digest: &str,
        original_length: i64,
        suffix: &[u8],
    ) -> Result<ForgeryResult> {
        let algorithm = self.resolve(name)?;
        if !algorithm.supports_length_extension() {
            return Err(Error::LengthExtensionUnsupported(algorithm));
        }
        length_extension::forge(original_digest, original_length, suffix)
    }
}

/// Lowercase hex digest of `data` under the named algorithm, using a router that serves
/// every algorithm.
pub fn compute(name: &str, data: &[u8]) -> Result<String> {
    HashRouter::new().compute(name, data)
}
