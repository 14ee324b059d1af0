//! # MAX! Message Decoding
//!
//! A message is the ten-byte [`MessageHeader`] followed by a payload whose
//! layout depends on the message type. Payload decoders exist for the types
//! that carry heating state; every other type, including values that have
//! no name at all, is kept as an opaque [`Payload::Unknown`] borrowing the
//! caller's buffer.
//!
//! Decoding also feeds the [`DeviceRegistry`]: sender and recipient are
//! resolved (and claimed if new) before the payload is decoded, and state
//! reports are written to the sender's entry once the payload decoded
//! successfully.

use crate::device_registry::{DeviceRegistry, DeviceSlot};
use crate::error::MaxError;
use crate::protocol::header::MessageHeader;
use crate::protocol::types::{DeviceType, DisplayMode, MessageType, Mode};
use crate::protocol::until::UntilTime;
use crate::util::bits::bit;
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;

bitflags! {
    /// Status bits in the first ThermostatState payload byte (above the mode bits)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThermostatFlags: u8 {
        const DST_ADJUST = 0x04;
        const LOCKED = 0x20;
        const BATTERY_LOW = 0x80;
    }
}

fn require(payload: &[u8], needed: usize, message_type: MessageType) -> Result<(), MaxError> {
    if payload.len() < needed {
        return Err(MaxError::PayloadTooShort {
            message_type: message_type.as_u8(),
            needed,
            actual: payload.len(),
        });
    }
    Ok(())
}

/// Target temperature command (0x40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetTemperature {
    /// In 0.5° units
    pub set_temp: u8,
    pub mode: Mode,
    pub until: Option<UntilTime>,
}

impl SetTemperature {
    pub const MIN_LEN: usize = 1;

    pub fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        require(payload, Self::MIN_LEN, MessageType::SetTemperature)?;
        Ok(Self {
            set_temp: payload[0] & 0x3F,
            mode: Mode::from_bits(payload[0] >> 6),
            until: UntilTime::decode(&payload[1..]),
        })
    }

    pub fn set_temp_celsius(&self) -> f32 {
        f32::from(self.set_temp) / 2.0
    }
}

/// Periodic report of a wall thermostat (0x42)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WallThermostatState {
    /// In 0.5° units
    pub set_temp: u8,
    /// In 0.1° units
    pub actual_temp: u16,
}

impl WallThermostatState {
    pub const MIN_LEN: usize = 2;

    pub fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        require(payload, Self::MIN_LEN, MessageType::WallThermostatState)?;
        Ok(Self {
            set_temp: payload[0] & 0x7F,
            actual_temp: (u16::from(payload[0] & 0x80) << 1) | u16::from(payload[1]),
        })
    }

    pub fn set_temp_celsius(&self) -> f32 {
        f32::from(self.set_temp) / 2.0
    }

    pub fn actual_temp_celsius(&self) -> f32 {
        f32::from(self.actual_temp) / 10.0
    }
}

/// Periodic report of a radiator thermostat (0x60)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThermostatState {
    pub mode: Mode,
    pub dst: bool,
    pub locked: bool,
    pub battery_low: bool,
    pub valve_pos_percent: u8,
    /// In 0.5° units
    pub set_temp: u8,
    /// In 0.1° units, 0 when the report carries no measurement
    pub actual_temp: u16,
    /// Only reported in temporary mode
    pub until: Option<UntilTime>,
}

impl ThermostatState {
    pub const MIN_LEN: usize = 3;

    pub fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        require(payload, Self::MIN_LEN, MessageType::ThermostatState)?;

        let flags = ThermostatFlags::from_bits_truncate(payload[0]);
        let mode = Mode::from_bits(payload[0]);

        // Bytes 3.. hold either a measurement or, in temporary mode, the end time
        let (actual_temp, until) = if mode == Mode::Temporary {
            (0, UntilTime::decode(&payload[3..]))
        } else if payload.len() >= 5 {
            ((u16::from(payload[3] & 0x1) << 8) | u16::from(payload[4]), None)
        } else {
            (0, None)
        };

        Ok(Self {
            mode,
            dst: flags.contains(ThermostatFlags::DST_ADJUST),
            locked: flags.contains(ThermostatFlags::LOCKED),
            battery_low: flags.contains(ThermostatFlags::BATTERY_LOW),
            valve_pos_percent: payload[1],
            set_temp: payload[2],
            actual_temp,
            until,
        })
    }

    pub fn set_temp_celsius(&self) -> f32 {
        f32::from(self.set_temp) / 2.0
    }

    pub fn actual_temp_celsius(&self) -> Option<f32> {
        (self.actual_temp != 0).then(|| f32::from(self.actual_temp) / 10.0)
    }
}

/// Switches what a wall thermostat displays (0x82)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetDisplayActualTemperature {
    pub display_mode: DisplayMode,
}

impl SetDisplayActualTemperature {
    pub const MIN_LEN: usize = 1;

    pub fn decode(payload: &[u8]) -> Result<Self, MaxError> {
        require(payload, Self::MIN_LEN, MessageType::SetDisplayActualTemperature)?;
        let display_mode = if bit(payload[0], 2) {
            DisplayMode::ActualTemperature
        } else {
            DisplayMode::SetTemperature
        };
        Ok(Self { display_mode })
    }
}

/// Type-specific part of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload<'a> {
    /// Undecoded bytes after the header, borrowed from the input buffer
    Unknown { data: Cow<'a, [u8]> },
    SetTemperature(SetTemperature),
    WallThermostatState(WallThermostatState),
    ThermostatState(ThermostatState),
    SetDisplayActualTemperature(SetDisplayActualTemperature),
}

impl<'a> Payload<'a> {
    /// Pick the decoder for `message_type` and run it on `payload`.
    pub fn decode(message_type: MessageType, payload: &'a [u8]) -> Result<Self, MaxError> {
        match message_type {
            MessageType::SetTemperature => {
                SetTemperature::decode(payload).map(Payload::SetTemperature)
            }
            MessageType::WallThermostatState => {
                WallThermostatState::decode(payload).map(Payload::WallThermostatState)
            }
            MessageType::ThermostatState => {
                ThermostatState::decode(payload).map(Payload::ThermostatState)
            }
            MessageType::SetDisplayActualTemperature => {
                SetDisplayActualTemperature::decode(payload)
                    .map(Payload::SetDisplayActualTemperature)
            }
            _ => Ok(Payload::Unknown {
                data: Cow::Borrowed(payload),
            }),
        }
    }

    pub fn into_owned(self) -> Payload<'static> {
        match self {
            Payload::Unknown { data } => Payload::Unknown {
                data: Cow::Owned(data.into_owned()),
            },
            Payload::SetTemperature(p) => Payload::SetTemperature(p),
            Payload::WallThermostatState(p) => Payload::WallThermostatState(p),
            Payload::ThermostatState(p) => Payload::ThermostatState(p),
            Payload::SetDisplayActualTemperature(p) => Payload::SetDisplayActualTemperature(p),
        }
    }
}

/// A decoded message
///
/// An [`Payload::Unknown`] payload borrows the buffer passed to [`parse`],
/// so the buffer must outlive the message. Call
/// [`into_owned`](Message::into_owned) to keep a message longer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message<'a> {
    pub header: MessageHeader,
    /// Registry entry of the sender, if it is tracked
    pub from: Option<DeviceSlot>,
    /// Registry entry of the recipient, if it is tracked
    pub to: Option<DeviceSlot>,
    pub payload: Payload<'a>,
}

impl<'a> Message<'a> {
    pub fn message_type(&self) -> MessageType {
        self.header.message_type
    }

    pub fn into_owned(self) -> Message<'static> {
        Message {
            header: self.header,
            from: self.from,
            to: self.to,
            payload: self.payload.into_owned(),
        }
    }

    /// Write the state this message reports into the sender's registry entry.
    ///
    /// Only wall and radiator thermostat reports carry device state; other
    /// messages, and messages from untracked senders, leave the registry alone.
    pub fn apply_state_update(&self, registry: &mut DeviceRegistry, now: DateTime<Utc>) {
        let Some(device) = self.from.and_then(|slot| registry.device_mut(slot)) else {
            return;
        };

        match &self.payload {
            Payload::WallThermostatState(state) => {
                device.apply_wall_state(state.set_temp, state.actual_temp, now);
            }
            Payload::ThermostatState(state) => {
                device.apply_thermostat_state(
                    state.mode,
                    state.valve_pos_percent,
                    state.set_temp,
                    state.actual_temp,
                    now,
                );
            }
            Payload::Unknown { .. }
            | Payload::SetTemperature(_)
            | Payload::SetDisplayActualTemperature(_) => {}
        }
    }
}

/// Decode `buf` (header and payload, no length byte or checksum).
///
/// Returns the reason a frame was discarded; see [`parse`] for the plain
/// variant.
pub fn try_parse<'a>(
    buf: &'a [u8],
    registry: &mut DeviceRegistry,
) -> Result<Message<'a>, MaxError> {
    try_parse_at(buf, registry, Utc::now())
}

/// [`try_parse`] with an explicit observation time for state updates.
pub fn try_parse_at<'a>(
    buf: &'a [u8],
    registry: &mut DeviceRegistry,
    now: DateTime<Utc>,
) -> Result<Message<'a>, MaxError> {
    let (header, payload) = MessageHeader::split(buf)?;

    let from = registry.resolve_slot(header.address_from, header.message_type.sender_type());
    let to = registry.resolve_slot(header.address_to, DeviceType::Unknown);

    let payload = Payload::decode(header.message_type, payload)?;

    let message = Message {
        header,
        from,
        to,
        payload,
    };
    message.apply_state_update(registry, now);
    Ok(message)
}

/// Decode `buf`, or `None` if it is too short for its header or payload.
///
/// No partially decoded message is ever returned.
pub fn parse<'a>(buf: &'a [u8], registry: &mut DeviceRegistry) -> Option<Message<'a>> {
    match try_parse(buf, registry) {
        Ok(message) => Some(message),
        Err(e) => {
            log::debug!("Discarding message: {e}");
            None
        }
    }
}
