//! # On-Air Frame Envelope
//!
//! Between the sync words and the end of a transmission, a MAX! frame is
//!
//! ```text
//! [len][message: len bytes][crc hi][crc lo]
//! ```
//!
//! with everything whitened. The checksum covers the length byte and the
//! message. Radios configured for a fixed packet length hand over more
//! bytes than the envelope holds; the excess is ignored.

use crate::constants::{ENVELOPE_OVERHEAD, PN9_LEN};
use crate::error::MaxError;
use crate::radio::{crc, pn9};
use crate::util::logging;

/// Dewhiten `buf` in place, validate the envelope and return the message.
///
/// Only the first [`PN9_LEN`] bytes can be dewhitened; anything longer is
/// rejected before `buf` is touched.
pub fn decode_envelope(buf: &mut [u8]) -> Result<&[u8], MaxError> {
    pn9::xor_pn9(buf)?;

    let Some(&length) = buf.first() else {
        return Err(MaxError::InvalidLength {
            length: 0,
            available: 0,
        });
    };

    let message_end = 1 + length as usize;
    if message_end + 2 > buf.len() {
        return Err(MaxError::InvalidLength {
            length,
            available: buf.len(),
        });
    }

    let expected = u16::from_be_bytes([buf[message_end], buf[message_end + 1]]);
    let calculated = crc::checksum16(&buf[..message_end]);
    if expected != calculated {
        return Err(MaxError::CrcMismatch {
            expected,
            calculated,
        });
    }
    logging::debug::log_crc_result(expected, calculated, true);

    Ok(&buf[1..message_end])
}

/// Wrap a message for transmission: length byte, checksum, whitening.
pub fn encode_envelope(message: &[u8]) -> Result<Vec<u8>, MaxError> {
    let length = u8::try_from(message.len()).map_err(|_| {
        MaxError::Other(format!(
            "message of {} bytes exceeds the length byte",
            message.len()
        ))
    })?;

    let total = message.len() + ENVELOPE_OVERHEAD;
    if total > PN9_LEN {
        return Err(MaxError::BufferTooLong {
            len: total,
            max: PN9_LEN,
        });
    }

    let mut body = Vec::with_capacity(message.len() + 1);
    body.push(length);
    body.extend_from_slice(message);

    let mut frame = crc::append(&body);
    pn9::xor_pn9(&mut frame)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hex::hex_to_bytes;

    const MESSAGE: &str = "E40470 0298E5 000000 00 19042A00CD";

    #[test]
    fn test_encode_then_decode() {
        let message = hex_to_bytes(MESSAGE);
        let mut frame = encode_envelope(&message).unwrap();
        assert_eq!(frame.len(), message.len() + ENVELOPE_OVERHEAD);

        let decoded = decode_envelope(&mut frame).unwrap();
        assert_eq!(decoded, &message[..]);
    }

    #[test]
    fn test_known_checksum() {
        let message = hex_to_bytes(MESSAGE);
        let mut frame = encode_envelope(&message).unwrap();
        pn9::xor_pn9(&mut frame).unwrap();
        assert_eq!(frame[0], 15);
        assert_eq!(&frame[16..], &[0x32, 0x41]);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let message = hex_to_bytes(MESSAGE);
        let mut frame = encode_envelope(&message).unwrap();
        // Fixed-length reception pads with whatever was on air
        frame.extend_from_slice(&[0x12, 0x34]);
        assert_eq!(decode_envelope(&mut frame).unwrap(), &message[..]);
    }

    #[test]
    fn test_corrupted_frame_rejected() {
        let message = hex_to_bytes(MESSAGE);
        let mut frame = encode_envelope(&message).unwrap();
        frame[5] ^= 0x01;
        assert!(matches!(
            decode_envelope(&mut frame),
            Err(MaxError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_length_past_end_rejected() {
        let mut frame = vec![0x20, 0x01, 0x02];
        pn9::xor_pn9(&mut frame).unwrap();
        assert!(matches!(
            decode_envelope(&mut frame),
            Err(MaxError::InvalidLength { length: 0x20, available: 3 })
        ));
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let mut frame: Vec<u8> = Vec::new();
        assert!(matches!(
            decode_envelope(&mut frame),
            Err(MaxError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_oversized_message_rejected() {
        let message = vec![0u8; PN9_LEN];
        assert!(matches!(
            encode_envelope(&message),
            Err(MaxError::BufferTooLong { .. })
        ));
    }
}
