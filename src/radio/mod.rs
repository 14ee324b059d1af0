//! # MAX! Radio Link Layer
//!
//! Everything between the transceiver FIFO and the message grammar: PN9
//! whitening, the CRC-16 checksum, the length/checksum envelope and the
//! receive pipeline that strings them together.

pub mod crc;
pub mod frame;
pub mod pn9;
pub mod receiver;

pub use crc::checksum16;
pub use frame::{decode_envelope, encode_envelope};
pub use pn9::xor_pn9;
pub use receiver::{ReceiveStats, Receiver};
