//! # Frame Checksum
//!
//! CRC-16 as computed by the CC1101 and described in TI design note DN502:
//! polynomial 0x8005, register seeded with 0xFFFF, data consumed MSB first,
//! no final XOR. On air the checksum follows the frame big-endian.

use crate::constants::{CRC16_INIT, CRC16_POLY};

#[inline]
fn crc_step(mut crc: u16, mut data: u8) -> u16 {
    for _ in 0..8 {
        if ((crc & 0x8000) >> 8) as u8 ^ (data & 0x80) != 0 {
            crc = (crc << 1) ^ CRC16_POLY;
        } else {
            crc <<= 1;
        }
        data <<= 1;
    }
    crc
}

/// Compute the 16-bit checksum over `data`.
pub fn checksum16(data: &[u8]) -> u16 {
    data.iter().fold(CRC16_INIT, |crc, &byte| crc_step(crc, byte))
}

/// Check a buffer whose last two bytes are its big-endian checksum.
pub fn verify(data_with_crc: &[u8]) -> bool {
    if data_with_crc.len() < 2 {
        return false;
    }
    let (data, crc_bytes) = data_with_crc.split_at(data_with_crc.len() - 2);
    let expected = u16::from_be_bytes([crc_bytes[0], crc_bytes[1]]);
    checksum16(data) == expected
}

/// Return `data` with its big-endian checksum appended.
pub fn append(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 2);
    out.extend_from_slice(data);
    out.extend_from_slice(&checksum16(data).to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        // CRC-16/CMS catalogue check value
        assert_eq!(checksum16(b"123456789"), 0xAEE7);
    }

    #[test]
    fn test_empty_is_init() {
        assert_eq!(checksum16(&[]), CRC16_INIT);
    }

    #[test]
    fn test_append_then_verify() {
        let data = [0x0F, 0xE4, 0x04, 0x70, 0x02, 0x98, 0xE5];
        let framed = append(&data);
        assert_eq!(framed.len(), data.len() + 2);
        assert!(verify(&framed));

        let mut corrupted = framed.clone();
        corrupted[3] ^= 0x10;
        assert!(!verify(&corrupted));
    }

    #[test]
    fn test_verify_too_short() {
        assert!(!verify(&[]));
        assert!(!verify(&[0xFF]));
    }
}
