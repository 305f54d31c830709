//! DISCLAIMER: MD4 is broken. Collisions can be found by hand and its digest leaks the full
//! internal state, which is exactly what the length-extension attack in this crate exploits.
//! This implementation exists to study and demonstrate that weakness. Absolutely DO NOT use it
//! for anything security-sensitive.
//!
//! The algorithm follows RFC 1320: a four-word chaining state updated by a three-round
//! compression function over 64-byte blocks, closed with the padding from
//! [`padding_for`](super::padding::padding_for).

use crate::error::{Error, Result};
use crate::hash::padding::{padding_for, BLOCK_SIZE};

/// The size of the MD4 digest in bytes (128 bits = 16 bytes).
pub const MD4_OUTPUT_SIZE: usize = 16;

/// Round 2 additive constant (square root of 2).
const ROUND2_CONSTANT: u32 = 0x5a82_7999;
/// Round 3 additive constant (square root of 3).
const ROUND3_CONSTANT: u32 = 0x6ed9_eba1;

/// Left rotations, per round, for the A, D, C and B steps.
const ROUND1_SHIFTS: [u32; 4] = [3, 7, 11, 19];
const ROUND2_SHIFTS: [u32; 4] = [3, 5, 9, 13];
const ROUND3_SHIFTS: [u32; 4] = [3, 9, 11, 15];

/// Word access order of round 3.
const ROUND3_ORDER: [usize; 16] = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];

/// The four 32-bit words (A, B, C, D) carried from block to block.
///
/// Serialized little-endian as `A‖B‖C‖D` this *is* the MD4 digest, and parsing a digest
/// back gives the state at the point the message was fully padded and consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainingState {
    /// Word A
    pub a: u32,
    /// Word B
    pub b: u32,
    /// Word C
    pub c: u32,
    /// Word D
    pub d: u32,
}

impl ChainingState {
    /// The initial values for (A, B, C, D) from the MD4 specification.
    pub const INITIAL: Self = Self {
        a: 0x6745_2301,
        b: 0xefcd_ab89,
        c: 0x98ba_dcfe,
        d: 0x1032_5476,
    };

    /// Parses a digest back into the state that produced it.
    pub fn from_digest(digest: &[u8; MD4_OUTPUT_SIZE]) -> Self {
        let word = |i: usize| {
            u32::from_le_bytes([digest[i], digest[i + 1], digest[i + 2], digest[i + 3]])
        };
        Self {
            a: word(0),
            b: word(4),
            c: word(8),
            d: word(12),
        }
    }

    /// Serializes the state little-endian, A first.
    pub fn to_digest(&self) -> [u8; MD4_OUTPUT_SIZE] {
        let mut output = [0u8; MD4_OUTPUT_SIZE];
        output[0..4].copy_from_slice(&self.a.to_le_bytes());
        output[4..8].copy_from_slice(&self.b.to_le_bytes());
        output[8..12].copy_from_slice(&self.c.to_le_bytes());
        output[12..16].copy_from_slice(&self.d.to_le_bytes());
        output
    }
}

impl Default for ChainingState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// A single MD4 hashing session.
///
/// The session owns its state outright. [`finalize`](Md4::finalize) takes it by value, so a
/// session can neither be finalized twice nor updated after it has produced a digest.
#[derive(Debug, Clone)]
pub struct Md4 {
    state: ChainingState,
    /// Bytes waiting for a full block
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    /// Total bytes fed so far, including any prefix the session was resumed after
    byte_count: u64,
}

impl Md4 {
    /// Creates a new MD4 context.
    pub fn new() -> Self {
        Self {
            state: ChainingState::INITIAL,
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            byte_count: 0,
        }
    }

    /// Resumes hashing from `state`, as though `byte_count` bytes had already been compressed.
    ///
    /// `byte_count` must be a whole number of blocks, since a chaining state only exists at
    /// block boundaries.
    pub fn from_state(state: ChainingState, byte_count: u64) -> Result<Self> {
        if byte_count % BLOCK_SIZE as u64 != 0 {
            return Err(Error::InvalidLength(byte_count.into()));
        }
        log::trace!("resuming md4 session after {byte_count} bytes");
        Ok(Self {
            state,
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            byte_count,
        })
    }

    /// Current chaining state. Bytes still sitting in the buffer are not reflected yet.
    pub fn state(&self) -> ChainingState {
        self.state
    }

    /// Total number of bytes this session has accounted for.
    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    /// Feeds `data` into the session, compressing each block as soon as it is complete.
    pub fn update(&mut self, data: &[u8]) {
        self.byte_count = self.byte_count.wrapping_add(data.len() as u64);
        self.absorb(data);
    }

    /// Pads the message and returns the 16-byte digest.
    pub fn finalize(mut self) -> [u8; MD4_OUTPUT_SIZE] {
        let pad = padding_for(self.byte_count);
        self.absorb(&pad);
        debug_assert_eq!(self.buffer_len, 0, "padding must end on a block boundary");
        self.state.to_digest()
    }

    /// Buffers and compresses without touching the byte count.
    fn absorb(&mut self, data: &[u8]) {
        let mut remaining = data;
        while !remaining.is_empty() {
            let take = (BLOCK_SIZE - self.buffer_len).min(remaining.len());
            let (head, tail) = remaining.split_at(take);
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(head);
            self.buffer_len += take;
            remaining = tail;

            if self.buffer_len == BLOCK_SIZE {
                compress(&mut self.state, &self.buffer);
                self.buffer_len = 0;
            }
        }
    }
}

impl Default for Md4 {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to compute an MD4 digest in a single shot.
pub fn md4_digest(data: &[u8]) -> [u8; MD4_OUTPUT_SIZE] {
    let mut hasher = Md4::new();
    hasher.update(data);
    hasher.finalize()
}

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn step(acc: u32, mixed: u32, word: u32, constant: u32, shift: u32) -> u32 {
    acc.wrapping_add(mixed)
        .wrapping_add(word)
        .wrapping_add(constant)
        .rotate_left(shift)
}

/// Processes one 64-byte block, read as sixteen little-endian words.
fn compress(state: &mut ChainingState, block: &[u8; BLOCK_SIZE]) {
    let mut x = [0u32; 16];
    for (word, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let ChainingState {
        mut a,
        mut b,
        mut c,
        mut d,
    } = *state;

    // Round 1
    let [s0, s1, s2, s3] = ROUND1_SHIFTS;
    for i in (0..16).step_by(4) {
        a = step(a, f(b, c, d), x[i], 0, s0);
        d = step(d, f(a, b, c), x[i + 1], 0, s1);
        c = step(c, f(d, a, b), x[i + 2], 0, s2);
        b = step(b, f(c, d, a), x[i + 3], 0, s3);
    }

    // Round 2, column-wise
    let [s0, s1, s2, s3] = ROUND2_SHIFTS;
    for i in 0..4 {
        a = step(a, g(b, c, d), x[i], ROUND2_CONSTANT, s0);
        d = step(d, g(a, b, c), x[i + 4], ROUND2_CONSTANT, s1);
        c = step(c, g(d, a, b), x[i + 8], ROUND2_CONSTANT, s2);
        b = step(b, g(c, d, a), x[i + 12], ROUND2_CONSTANT, s3);
    }

    // Round 3
    let [s0, s1, s2, s3] = ROUND3_SHIFTS;
    for i in (0..16).step_by(4) {
        a = step(a, h(b, c, d), x[ROUND3_ORDER[i]], ROUND3_CONSTANT, s0);
        d = step(d, h(a, b, c), x[ROUND3_ORDER[i + 1]], ROUND3_CONSTANT, s1);
        c = step(c, h(d, a, b), x[ROUND3_ORDER[i + 2]], ROUND3_CONSTANT, s2);
        b = step(b, h(c, d, a), x[ROUND3_ORDER[i + 3]], ROUND3_CONSTANT, s3);
    }

    state.a = state.a.wrapping_add(a);
    state.b = state.b.wrapping_add(b);
    state.c = state.c.wrapping_add(c);
    state.d = state.d.wrapping_add(d);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test suite from RFC 1320, appendix A.5

    #[test]
    fn test_md4_empty() {
        let digest = md4_digest(b"");
        assert_eq!(hex::encode(digest), "31d6cfe0d16ae931b73c59d7e0c089c0");
    }

    #[test]
    fn test_md4_abc() {
        let digest = md4_digest(b"abc");
        assert_eq!(hex::encode(digest), "a448017aaf21d8525fc10ae87aa6729d");
    }

    #[test]
    fn test_md4_rfc_suite() {
        let vectors: [(&[u8], &str); 5] = [
            (b"a", "bde52cb31de33e46245e05fbdbd6fb24"),
            (b"message digest", "d9130a8164549fe818874806e1c7014b"),
            (
                b"abcdefghijklmnopqrstuvwxyz",
                "d79e1c308aa5bbcdeea8ed63df412da9",
            ),
            (
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                "043f8582f241db351ce627e153e7f0e4",
            ),
            (
                b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                "e33b4ddc9c38f2199c3e7b164fcc0536",
            ),
        ];
        for (input, expected) in vectors {
            assert_eq!(
                hex::encode(md4_digest(input)),
                expected,
                "failed for input {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_incremental_every_split() {
        let message: Vec<u8> = (0..200u8).collect();
        let single = md4_digest(&message);
        for split in 0..=message.len() {
            let mut hasher = Md4::new();
            hasher.update(&message[..split]);
            hasher.update(&message[split..]);
            assert_eq!(hasher.finalize(), single, "split at {split}");
        }
    }

    #[test]
    fn test_buffer_stays_below_block() {
        let mut hasher = Md4::new();
        for chunk_len in [1usize, 63, 64, 65, 127, 128, 5] {
            hasher.update(&vec![0x5a; chunk_len]);
            assert!(hasher.buffer_len < BLOCK_SIZE);
        }
        assert_eq!(hasher.byte_count(), 1 + 63 + 64 + 65 + 127 + 128 + 5);
    }

    #[test]
    fn test_state_round_trips_through_digest() {
        let digest = md4_digest(b"round trip");
        let state = ChainingState::from_digest(&digest);
        assert_eq!(state.to_digest(), digest);
        assert_eq!(
            ChainingState::INITIAL.to_digest(),
            [
                0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76,
                0x54, 0x32, 0x10
            ]
        );
    }

    #[test]
    fn test_resume_matches_continuous_hashing() {
        let prefix = [0x11u8; 128];
        let suffix = b"tail after two blocks";

        let mut first = Md4::new();
        first.update(&prefix);
        let mut resumed = Md4::from_state(first.state(), 128).unwrap();
        resumed.update(suffix);

        let mut whole = Md4::new();
        whole.update(&prefix);
        whole.update(suffix);

        assert_eq!(resumed.finalize(), whole.finalize());
    }

    #[test]
    fn test_resume_rejects_unaligned_count() {
        let err = Md4::from_state(ChainingState::INITIAL, 65).unwrap_err();
        assert_eq!(err, Error::InvalidLength(65));
    }
}
