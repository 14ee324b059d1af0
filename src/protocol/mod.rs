//! # MAX! Message Grammar
//!
//! Header layout, message type table and the payload decoders for the
//! message types that carry heating state.

pub mod header;
pub mod message;
pub mod types;
pub mod until;

pub use header::MessageHeader;
pub use message::{
    parse, try_parse, try_parse_at, Message, Payload, SetDisplayActualTemperature, SetTemperature,
    ThermostatFlags, ThermostatState, WallThermostatState,
};
pub use types::{DeviceType, DisplayMode, MessageType, Mode};
pub use until::UntilTime;
