//! # Bit Field Extraction
//!
//! MAX! packs several fields below byte granularity (modes, flags, the
//! until-time date) and stores addresses as 24-bit big-endian values. This
//! module reads such fields as an MSB-first bit stream.
//!
//! ## Usage
//!
//! ```rust
//! use maxrf_rs::util::bits::extract;
//!
//! // 24-bit device address
//! assert_eq!(extract(&[0x02, 0x98, 0xE5], 0, 24), 0x0298E5);
//!
//! // 9 bits straddling a byte boundary
//! assert_eq!(extract(&[0xA5, 0xF0], 3, 9), 0x5F);
//! ```

/// Number of bits available in `buf` starting at `start_bit`.
#[inline]
pub fn remaining_bits(buf: &[u8], start_bit: usize) -> usize {
    (buf.len() * 8).saturating_sub(start_bit)
}

/// Read `num_bits` bits starting `start_bit` bits after the MSB of `buf[0]`.
///
/// The bits are read most-significant first and the result is
/// right-aligned. Reading zero bits yields 0.
///
/// # Panics
///
/// Panics if `num_bits` is larger than 32 or runs past the end of `buf`.
/// Use [`try_extract`] when the range is not known to be valid.
pub fn extract(buf: &[u8], start_bit: usize, num_bits: u32) -> u32 {
    assert!(num_bits <= 32, "cannot extract {num_bits} bits into a u32");
    assert!(
        num_bits as usize <= remaining_bits(buf, start_bit),
        "bit range {start_bit}+{num_bits} exceeds buffer of {} bytes",
        buf.len()
    );

    if num_bits == 0 {
        return 0;
    }

    let end_bit = start_bit + num_bits as usize;
    let first = start_bit / 8;
    let last = (end_bit - 1) / 8;

    // At most 5 bytes are spanned (7 bits of lead-in + 32 bits), so a u64
    // always holds the window.
    let window = buf[first..=last]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

    let trailing = (last + 1) * 8 - end_bit;
    let mask = (1u64 << num_bits) - 1;
    ((window >> trailing) & mask) as u32
}

/// Checked variant of [`extract`].
///
/// Returns `None` instead of panicking when the range is invalid.
pub fn try_extract(buf: &[u8], start_bit: usize, num_bits: u32) -> Option<u32> {
    if num_bits > 32 || num_bits as usize > remaining_bits(buf, start_bit) {
        return None;
    }
    Some(extract(buf, start_bit, num_bits))
}

/// Test a single bit, counting from the least significant bit of `byte`.
#[inline]
pub fn bit(byte: u8, index: u8) -> bool {
    (byte >> index) & 0x1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_byte_aligned() {
        let buf = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(extract(&buf, 0, 8), 0x12);
        assert_eq!(extract(&buf, 8, 16), 0x3456);
        assert_eq!(extract(&buf, 0, 32), 0x12345678);
    }

    #[test]
    fn test_extract_unaligned() {
        let buf = [0x12, 0x34, 0x56, 0x78, 0x9A];
        assert_eq!(extract(&buf, 4, 32), 0x23456789);
        assert_eq!(extract(&buf, 4, 4), 0x2);
        assert_eq!(extract(&buf, 1, 3), 0x1);
    }

    #[test]
    fn test_extract_zero_bits() {
        assert_eq!(extract(&[0xFF], 3, 0), 0);
        assert_eq!(extract(&[], 0, 0), 0);
    }

    #[test]
    fn test_extract_single_bits() {
        let buf = [0b1000_0001];
        assert_eq!(extract(&buf, 0, 1), 1);
        assert_eq!(extract(&buf, 1, 1), 0);
        assert_eq!(extract(&buf, 7, 1), 1);
    }

    #[test]
    #[should_panic]
    fn test_extract_past_end_panics() {
        extract(&[0x00, 0x00], 9, 8);
    }

    #[test]
    fn test_try_extract() {
        assert_eq!(try_extract(&[0xAB], 0, 8), Some(0xAB));
        assert_eq!(try_extract(&[0xAB], 1, 8), None);
        assert_eq!(try_extract(&[0u8; 8], 0, 33), None);
    }

    #[test]
    fn test_bit() {
        assert!(bit(0x80, 7));
        assert!(!bit(0x80, 6));
        assert!(bit(0x04, 2));
    }

    fn reference(buf: &[u8], start: usize, width: u32) -> u32 {
        (0..width as usize).fold(0u32, |acc, i| {
            let pos = start + i;
            let b = (buf[pos / 8] >> (7 - pos % 8)) & 1;
            (acc << 1) | u32::from(b)
        })
    }

    proptest! {
        #[test]
        fn prop_extract_matches_bitstream(
            buf in proptest::collection::vec(any::<u8>(), 1..12),
            start in 0usize..96,
            width in 0u32..=32,
        ) {
            let start = start % (buf.len() * 8 + 1);
            let width = width.min(remaining_bits(&buf, start) as u32);
            let first = extract(&buf, start, width);
            prop_assert_eq!(first, extract(&buf, start, width));
            prop_assert_eq!(first, reference(&buf, start, width));
        }
    }
}
