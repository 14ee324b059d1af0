//! # Human-Readable Reports
//!
//! Text rendering of decoded messages and of the device table, in the
//! aligned "title: value" layout used by serial sniffer output:
//!
//! ```text
//! Sequence num:   E4
//! Flags:          04
//! Packet type:    70 (Unknown)
//! Packet from:    0298E5
//! Packet to:      000000
//! Group id:       00
//! Payload:        19 04 2A 00 CD
//! ```
//!
//! Nothing in the decoding path depends on this module.

use crate::constants::{ACTUAL_TEMP_UNKNOWN, SET_TEMP_UNKNOWN, VALVE_UNKNOWN};
use crate::device_registry::{Device, DeviceKind, DeviceRegistry, DeviceSlot};
use crate::protocol::message::{Message, Payload};
use crate::util::hex::{format_address, format_hex_spaced};
use std::fmt;

const TITLE_WIDTH: usize = 16;
const NA: &str = "NA";

fn line(f: &mut fmt::Formatter<'_>, title: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:<width$}{}", title, value, width = TITLE_WIDTH)
}

/// Set temperature in 0.5° units, "NA" for the sentinel
pub fn format_set_temp(set_temp: u8) -> String {
    if set_temp == SET_TEMP_UNKNOWN {
        NA.to_string()
    } else {
        format!("{:.1}", f32::from(set_temp) / 2.0)
    }
}

/// Actual temperature in 0.1° units, "NA" for the sentinel
pub fn format_actual_temp(actual_temp: u16) -> String {
    if actual_temp == ACTUAL_TEMP_UNKNOWN {
        NA.to_string()
    } else {
        format!("{}.{}", actual_temp / 10, actual_temp % 10)
    }
}

/// Valve position in percent, "NA" for the sentinel
pub fn format_valve(valve_pos_percent: u8) -> String {
    if valve_pos_percent == VALVE_UNKNOWN {
        NA.to_string()
    } else {
        format!("{valve_pos_percent}%")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Renders one message, naming known devices when a registry is supplied
pub struct MessageReport<'m, 'a> {
    message: &'m Message<'a>,
    registry: Option<&'m DeviceRegistry>,
}

impl<'m, 'a> MessageReport<'m, 'a> {
    pub fn new(message: &'m Message<'a>) -> Self {
        Self {
            message,
            registry: None,
        }
    }

    pub fn with_registry(message: &'m Message<'a>, registry: &'m DeviceRegistry) -> Self {
        Self {
            message,
            registry: Some(registry),
        }
    }

    fn address(&self, address: u32, slot: Option<DeviceSlot>) -> String {
        let name = slot
            .zip(self.registry)
            .and_then(|(slot, registry)| registry.device(slot))
            .and_then(|device| device.name.as_deref());
        match name {
            Some(name) => format!("{} ({name})", format_address(address)),
            None => format_address(address),
        }
    }
}

impl fmt::Display for MessageReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = &self.message.header;
        line(f, "Sequence num:", format_args!("{:02X}", header.sequence_number))?;
        line(f, "Flags:", format_args!("{:02X}", header.flags))?;
        line(
            f,
            "Packet type:",
            format_args!("{:02X} ({})", header.message_type.as_u8(), header.message_type),
        )?;
        line(f, "Packet from:", self.address(header.address_from, self.message.from))?;
        line(f, "Packet to:", self.address(header.address_to, self.message.to))?;
        line(f, "Group id:", format_args!("{:02X}", header.group_id))?;

        match &self.message.payload {
            Payload::Unknown { data } => {
                line(f, "Payload:", format_hex_spaced(data))?;
            }
            Payload::SetTemperature(p) => {
                line(f, "Mode:", p.mode)?;
                line(f, "Set temp:", format_set_temp(p.set_temp))?;
                if let Some(until) = &p.until {
                    line(f, "Until:", until)?;
                }
            }
            Payload::WallThermostatState(p) => {
                line(f, "Set temp:", format_set_temp(p.set_temp))?;
                line(f, "Actual temp:", format_actual_temp(p.actual_temp))?;
            }
            Payload::ThermostatState(p) => {
                line(f, "Mode:", p.mode)?;
                line(f, "Adjust to DST:", yes_no(p.dst))?;
                line(f, "Locked:", yes_no(p.locked))?;
                line(f, "Battery Low:", yes_no(p.battery_low))?;
                line(f, "Valve position:", format_args!("{}%", p.valve_pos_percent))?;
                line(f, "Set temp:", format_set_temp(p.set_temp))?;
                if p.actual_temp != 0 {
                    line(f, "Actual temp:", format_actual_temp(p.actual_temp))?;
                }
                if let Some(until) = &p.until {
                    line(f, "Until:", until)?;
                }
            }
            Payload::SetDisplayActualTemperature(p) => {
                line(f, "Display mode:", p.display_mode)?;
            }
        }
        Ok(())
    }
}

/// Renders every occupied registry slot, one device per line
pub struct DeviceTableReport<'r> {
    registry: &'r DeviceRegistry,
}

impl<'r> DeviceTableReport<'r> {
    pub fn new(registry: &'r DeviceRegistry) -> Self {
        Self { registry }
    }
}

fn device_line(f: &mut fmt::Formatter<'_>, device: &Device) -> fmt::Result {
    write!(
        f,
        "{:<20} {:<8} set {:>4}  actual {:>4}",
        device.label(),
        device.device_type(),
        format_set_temp(device.set_temp),
        format_actual_temp(device.actual_temp),
    )?;
    if let Some(at) = device.actual_temp_observed_at {
        write!(f, " ({})", at.format("%H:%M:%S"))?;
    }
    if let DeviceKind::Radiator(state) = &device.kind {
        write!(
            f,
            "  valve {:>4}  mode {}",
            format_valve(state.valve_pos_percent),
            state.mode
        )?;
    }
    writeln!(f)
}

impl fmt::Display for DeviceTableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Devices: {} of {} slots used",
            self.registry.len(),
            self.registry.capacity()
        )?;
        for (_, device) in self.registry.iter() {
            device_line(f, device)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_set_temp(42), "21.0");
        assert_eq!(format_set_temp(43), "21.5");
        assert_eq!(format_set_temp(SET_TEMP_UNKNOWN), "NA");
        assert_eq!(format_actual_temp(205), "20.5");
        assert_eq!(format_actual_temp(ACTUAL_TEMP_UNKNOWN), "NA");
        assert_eq!(format_valve(64), "64%");
        assert_eq!(format_valve(VALVE_UNKNOWN), "NA");
    }

    #[test]
    fn test_line_alignment() {
        struct One;
        impl fmt::Display for One {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                line(f, "Flags:", "04")
            }
        }
        assert_eq!(One.to_string(), "Flags:          04\n");
    }
}
