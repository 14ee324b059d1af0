//! # PN9 Whitening
//!
//! MAX! devices whiten every frame with the CC1101 PN9 sequence
//! (x^9 + x^5 + 1, seeded with all ones). Transceivers that cannot do this
//! in hardware need it done in software on both the receive and the
//! transmit side. XOR against the sequence is its own inverse, so the same
//! [`xor_pn9`] call whitens and dewhitens.

use crate::constants::PN9_LEN;
use crate::error::MaxError;

/// The first [`PN9_LEN`] bytes of the PN9 sequence, built at compile time.
pub const PN9_TABLE: [u8; PN9_LEN] = pn9_table();

const fn pn9_table() -> [u8; PN9_LEN] {
    let mut table = [0u8; PN9_LEN];
    let mut state: u16 = 0x1FF;
    let mut i = 0;
    while i < PN9_LEN {
        table[i] = (state & 0xFF) as u8;
        let mut step = 0;
        while step < 8 {
            let feedback = (state ^ (state >> 5)) & 0x1;
            state = (state >> 1) | (feedback << 8);
            step += 1;
        }
        i += 1;
    }
    table
}

/// XOR the whole of `buf` with the PN9 sequence, in place.
///
/// Fails with [`MaxError::BufferTooLong`] when `buf` is longer than the
/// table; the buffer is left untouched in that case.
pub fn xor_pn9(buf: &mut [u8]) -> Result<(), MaxError> {
    if buf.len() > PN9_LEN {
        return Err(MaxError::BufferTooLong {
            len: buf.len(),
            max: PN9_LEN,
        });
    }

    for (byte, key) in buf.iter_mut().zip(PN9_TABLE.iter()) {
        *byte ^= key;
    }
    Ok(())
}
