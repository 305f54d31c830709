//! # Merkle–Damgård padding for MD4
//!
//! MD4 pads every message the same way: one `0x80` byte, zero bytes until the length is
//! 56 modulo 64, then the message length in **bits** as a little-endian `u64`. The padding
//! depends only on the message length, which is exactly what makes it computable for a
//! message nobody has seen. [`Md4::finalize`](super::md4::Md4::finalize) uses it to close a
//! session, and the length-extension attack uses it to rebuild the "glue" that sat between
//! the secret and the attacker's suffix.
//!
//! **Note**: The full padding is always between 9 and 72 bytes long.

/// MD4 block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Size of the trailing little-endian bit-length field.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// The byte that opens every padding sequence (a single set bit).
pub const PAD_START: u8 = 0x80;

/// Number of zero bytes between [`PAD_START`] and the length field for a message of `length` bytes.
///
/// `1 + zero_fill_len(length)` is always in `1..=64`.
pub fn zero_fill_len(length: u64) -> usize {
    let offset = (length % BLOCK_SIZE as u64) as usize;
    // the 0x80 byte sits at `offset`, the length field must start at 56 mod 64
    (2 * BLOCK_SIZE - LENGTH_FIELD_SIZE - 1 - offset) % BLOCK_SIZE
}

/// Returns the exact bytes MD4 appends to a message of `length` bytes.
pub fn padding_for(length: u64) -> Vec<u8> {
    let zeros = zero_fill_len(length);
    let mut pad = Vec::with_capacity(1 + zeros + LENGTH_FIELD_SIZE);
    pad.push(PAD_START);
    pad.resize(1 + zeros, 0);
    // bit length is taken mod 2^64, as RFC 1320 specifies
    pad.extend_from_slice(&length.wrapping_mul(8).to_le_bytes());
    pad
}

/// Length of a `length`-byte message once padded.
pub fn padded_len(length: u64) -> u64 {
    length + (1 + zero_fill_len(length) + LENGTH_FIELD_SIZE) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_empty_message() {
        let pad = padding_for(0);
        assert_eq!(pad.len(), 64);
        assert_eq!(pad[0], 0x80);
        assert!(pad[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_padding_aligns_to_block() {
        for length in 0..1024u64 {
            let pad = padding_for(length);
            assert_eq!((length + pad.len() as u64) % 64, 0, "length {length}");
            assert!((9..=72).contains(&pad.len()), "length {length}");
            assert_eq!(padded_len(length), length + pad.len() as u64);
        }
    }

    #[test]
    fn test_zero_fill_range() {
        for length in 0..256u64 {
            let fill = 1 + zero_fill_len(length);
            assert!((1..=64).contains(&fill), "length {length}");
        }
    }

    #[test]
    fn test_padding_crosses_boundary() {
        // 56 bytes leave no room for 0x80 plus the length field, so a whole extra block is needed
        let pad = padding_for(56);
        assert_eq!(pad.len(), 72);
        assert_eq!(pad[0], 0x80);

        // 55 bytes fit 0x80 exactly before the length field
        let pad = padding_for(55);
        assert_eq!(pad.len(), 9);
        assert_eq!(&pad[1..], &(55u64 * 8).to_le_bytes());
    }

    #[test]
    fn test_length_field_little_endian() {
        let pad = padding_for(3);
        // "abc" is 24 bits
        assert_eq!(hex::encode(&pad[pad.len() - 8..]), "1800000000000000");
    }

    #[test]
    fn test_large_length() {
        let length = (1u64 << 61) - 1;
        let pad = padding_for(length);
        assert_eq!((length % 64 + pad.len() as u64) % 64, 0);
        assert_eq!(&pad[pad.len() - 8..], &length.wrapping_mul(8).to_le_bytes());
    }
}
