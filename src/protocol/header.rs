//! # Message Header
//!
//! Every MAX! message starts with the same ten bytes:
//!
//! | Byte | Field           |
//! |------|-----------------|
//! | 0    | sequence number |
//! | 1    | flags           |
//! | 2    | message type    |
//! | 3-5  | from address    |
//! | 6-8  | to address      |
//! | 9    | group id        |

use crate::constants::{ADDRESS_BITS, HEADER_LEN};
use crate::error::MaxError;
use crate::protocol::types::MessageType;
use crate::util::bits::extract;
use nom::{
    bytes::complete::take,
    combinator::map,
    number::complete::be_u8,
    sequence::tuple,
    IResult,
};
use serde::Serialize;

/// Decoded message header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageHeader {
    pub sequence_number: u8,
    pub flags: u8,
    pub message_type: MessageType,
    /// 24-bit sender address
    pub address_from: u32,
    /// 24-bit recipient address, 0 for broadcasts
    pub address_to: u32,
    pub group_id: u8,
}

fn address(input: &[u8]) -> IResult<&[u8], u32> {
    map(take(3usize), |bytes: &[u8]| extract(bytes, 0, ADDRESS_BITS))(input)
}

/// nom parser for the header; returns the remaining payload bytes.
pub fn parse_header(input: &[u8]) -> IResult<&[u8], MessageHeader> {
    map(
        tuple((be_u8, be_u8, be_u8, address, address, be_u8)),
        |(sequence_number, flags, message_type, address_from, address_to, group_id)| {
            MessageHeader {
                sequence_number,
                flags,
                message_type: MessageType::from_u8(message_type),
                address_from,
                address_to,
                group_id,
            }
        },
    )(input)
}

impl MessageHeader {
    /// Split `buf` into a header and the payload that follows it.
    pub fn split(buf: &[u8]) -> Result<(MessageHeader, &[u8]), MaxError> {
        if buf.len() < HEADER_LEN {
            return Err(MaxError::FrameTooShort { len: buf.len() });
        }
        let (payload, header) =
            parse_header(buf).map_err(|e| MaxError::Other(format!("header: {e}")))?;
        Ok((header, payload))
    }

    /// Encode back to the ten on-air bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let from = self.address_from.to_be_bytes();
        let to = self.address_to.to_be_bytes();
        [
            self.sequence_number,
            self.flags,
            self.message_type.as_u8(),
            from[1],
            from[2],
            from[3],
            to[1],
            to[2],
            to[3],
            self.group_id,
        ]
    }

    /// A recipient address of zero addresses every listener.
    pub fn is_broadcast(&self) -> bool {
        self.address_to == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hex::hex_to_bytes;

    #[test]
    fn test_parse_header_fields() {
        let buf = hex_to_bytes("2C 02 02 0298E5 04C8DD 00 01110028");
        let (header, payload) = MessageHeader::split(&buf).unwrap();

        assert_eq!(header.sequence_number, 0x2C);
        assert_eq!(header.flags, 0x02);
        assert_eq!(header.message_type, MessageType::Ack);
        assert_eq!(header.address_from, 0x0298E5);
        assert_eq!(header.address_to, 0x04C8DD);
        assert_eq!(header.group_id, 0x00);
        assert_eq!(payload, &[0x01, 0x11, 0x00, 0x28]);
        assert!(!header.is_broadcast());
    }

    #[test]
    fn test_header_only() {
        let buf = hex_to_bytes("E5 00 81 00B825 0298E5 00");
        let (header, payload) = MessageHeader::split(&buf).unwrap();
        assert_eq!(header.message_type, MessageType::Unknown(0x81));
        assert!(payload.is_empty());
    }

    #[test]
    fn test_too_short() {
        let buf = [0u8; 9];
        assert!(matches!(
            MessageHeader::split(&buf),
            Err(MaxError::FrameTooShort { len: 9 })
        ));
    }

    #[test]
    fn test_to_bytes_restores_input() {
        let buf = hex_to_bytes("E4 04 70 0298E5 000000 00");
        let (header, _) = MessageHeader::split(&buf).unwrap();
        assert_eq!(header.to_bytes().to_vec(), buf);
        assert!(header.is_broadcast());
    }
}
