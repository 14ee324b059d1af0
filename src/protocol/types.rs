//! Enumerations shared by the message grammar and the device registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message type byte (header byte 2).
///
/// The set is open: values without a variant of their own are kept in
/// [`MessageType::Unknown`] so they survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    PairPing,
    PairPong,
    Ack,
    TimeInformation,
    ConfigWeekProfile,
    ConfigTemperatures,
    ConfigValve,
    AddLinkPartner,
    RemoveLinkPartner,
    SetGroupId,
    RemoveGroupId,
    ShutterContactState,
    SetTemperature,
    WallThermostatState,
    SetComfortTemperature,
    SetEcoTemperature,
    PushButtonState,
    ThermostatState,
    SetDisplayActualTemperature,
    Reset,
    WakeUp,
    Unknown(u8),
}

impl MessageType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => MessageType::PairPing,
            0x01 => MessageType::PairPong,
            0x02 => MessageType::Ack,
            0x03 => MessageType::TimeInformation,
            0x10 => MessageType::ConfigWeekProfile,
            0x11 => MessageType::ConfigTemperatures,
            0x12 => MessageType::ConfigValve,
            0x20 => MessageType::AddLinkPartner,
            0x21 => MessageType::RemoveLinkPartner,
            0x22 => MessageType::SetGroupId,
            0x23 => MessageType::RemoveGroupId,
            0x30 => MessageType::ShutterContactState,
            0x40 => MessageType::SetTemperature,
            0x42 => MessageType::WallThermostatState,
            0x43 => MessageType::SetComfortTemperature,
            0x44 => MessageType::SetEcoTemperature,
            0x50 => MessageType::PushButtonState,
            0x60 => MessageType::ThermostatState,
            0x82 => MessageType::SetDisplayActualTemperature,
            0xF0 => MessageType::Reset,
            0xF1 => MessageType::WakeUp,
            other => MessageType::Unknown(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            MessageType::PairPing => 0x00,
            MessageType::PairPong => 0x01,
            MessageType::Ack => 0x02,
            MessageType::TimeInformation => 0x03,
            MessageType::ConfigWeekProfile => 0x10,
            MessageType::ConfigTemperatures => 0x11,
            MessageType::ConfigValve => 0x12,
            MessageType::AddLinkPartner => 0x20,
            MessageType::RemoveLinkPartner => 0x21,
            MessageType::SetGroupId => 0x22,
            MessageType::RemoveGroupId => 0x23,
            MessageType::ShutterContactState => 0x30,
            MessageType::SetTemperature => 0x40,
            MessageType::WallThermostatState => 0x42,
            MessageType::SetComfortTemperature => 0x43,
            MessageType::SetEcoTemperature => 0x44,
            MessageType::PushButtonState => 0x50,
            MessageType::ThermostatState => 0x60,
            MessageType::SetDisplayActualTemperature => 0x82,
            MessageType::Reset => 0xF0,
            MessageType::WakeUp => 0xF1,
            MessageType::Unknown(value) => value,
        }
    }

    /// Human-readable name; "Unknown" for values outside the table.
    pub fn name(self) -> &'static str {
        match self {
            MessageType::PairPing => "PairPing",
            MessageType::PairPong => "PairPong",
            MessageType::Ack => "Ack",
            MessageType::TimeInformation => "TimeInformation",
            MessageType::ConfigWeekProfile => "ConfigWeekProfile",
            MessageType::ConfigTemperatures => "ConfigTemperatures",
            MessageType::ConfigValve => "ConfigValve",
            MessageType::AddLinkPartner => "AddLinkPartner",
            MessageType::RemoveLinkPartner => "RemoveLinkPartner",
            MessageType::SetGroupId => "SetGroupId",
            MessageType::RemoveGroupId => "RemoveGroupId",
            MessageType::ShutterContactState => "ShutterContactState",
            MessageType::SetTemperature => "SetTemperature",
            MessageType::WallThermostatState => "WallThermostatState",
            MessageType::SetComfortTemperature => "SetComfortTemperature",
            MessageType::SetEcoTemperature => "SetEcoTemperature",
            MessageType::PushButtonState => "PushButtonState",
            MessageType::ThermostatState => "ThermostatState",
            MessageType::SetDisplayActualTemperature => "SetDisplayActualTemperature",
            MessageType::Reset => "Reset",
            MessageType::WakeUp => "WakeUp",
            MessageType::Unknown(_) => "Unknown",
        }
    }

    /// Device type implied for the sender of this message type.
    pub fn sender_type(self) -> DeviceType {
        match self {
            MessageType::WallThermostatState => DeviceType::Wall,
            MessageType::ThermostatState => DeviceType::Radiator,
            _ => DeviceType::Unknown,
        }
    }
}

impl From<u8> for MessageType {
    fn from(value: u8) -> Self {
        MessageType::from_u8(value)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Operating mode of a thermostat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Auto,
    Manual,
    Temporary,
    Boost,
    Unknown,
}

impl Mode {
    /// Decode the two mode bits (only the low two bits of `bits` are used).
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => Mode::Auto,
            1 => Mode::Manual,
            2 => Mode::Temporary,
            _ => Mode::Boost,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Manual => "manual",
            Mode::Temporary => "temporary",
            Mode::Boost => "boost",
            Mode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// What a wall thermostat shows on its display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    SetTemperature,
    ActualTemperature,
}

impl DisplayMode {
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::SetTemperature => "Set temperature",
            DisplayMode::ActualTemperature => "Actual temperature",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Kind of device behind an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Unknown,
    Cube,
    Wall,
    Radiator,
}

impl DeviceType {
    pub fn name(self) -> &'static str {
        match self {
            DeviceType::Unknown => "unknown",
            DeviceType::Cube => "cube",
            DeviceType::Wall => "wall",
            DeviceType::Radiator => "radiator",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
