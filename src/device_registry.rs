//! # MAX! Device Registry
//!
//! This module provides the DeviceRegistry struct, a bounded table of every
//! device seen on the air together with the last state it reported.
//!
//! The registry has a fixed number of slots. Some may be seeded with known
//! devices (address, type, name); the rest are claimed in order as new
//! addresses show up in decoded traffic. Slots are never released, so once
//! the table is full further addresses stay anonymous while every claimed
//! address keeps resolving.
//!
//! Decoded messages refer to devices through [`DeviceSlot`] handles rather
//! than references, so a message can name both its sender and its recipient
//! while the registry stays mutable.

use crate::config::RegistryConfig;
use crate::constants::{ACTUAL_TEMP_UNKNOWN, ADDRESS_MAX, SET_TEMP_UNKNOWN, VALVE_UNKNOWN};
use crate::error::MaxError;
use crate::protocol::types::{DeviceType, Mode};
use crate::util::hex::format_address;
use crate::util::logging::LogThrottle;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Handle to an occupied registry slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceSlot(usize);

impl DeviceSlot {
    pub fn index(self) -> usize {
        self.0
    }
}

/// State only radiator thermostats report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadiatorState {
    pub mode: Mode,
    /// Valve opening in percent, [`VALVE_UNKNOWN`] until reported
    pub valve_pos_percent: u8,
}

impl Default for RadiatorState {
    fn default() -> Self {
        Self {
            mode: Mode::Unknown,
            valve_pos_percent: VALVE_UNKNOWN,
        }
    }
}

/// Device type together with its type-specific state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeviceKind {
    Unknown,
    Cube,
    Wall,
    Radiator(RadiatorState),
}

impl From<DeviceType> for DeviceKind {
    fn from(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Unknown => DeviceKind::Unknown,
            DeviceType::Cube => DeviceKind::Cube,
            DeviceType::Wall => DeviceKind::Wall,
            DeviceType::Radiator => DeviceKind::Radiator(RadiatorState::default()),
        }
    }
}

/// Last known state of one device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub address: u32,
    pub kind: DeviceKind,
    pub name: Option<String>,
    /// In 0.5° units, [`SET_TEMP_UNKNOWN`] until reported
    pub set_temp: u8,
    /// In 0.1° units, [`ACTUAL_TEMP_UNKNOWN`] until reported
    pub actual_temp: u16,
    /// When `actual_temp` was last updated
    pub actual_temp_observed_at: Option<DateTime<Utc>>,
}

impl Device {
    pub fn new(address: u32, device_type: DeviceType, name: Option<String>) -> Self {
        Self {
            address,
            kind: device_type.into(),
            name,
            set_temp: SET_TEMP_UNKNOWN,
            actual_temp: ACTUAL_TEMP_UNKNOWN,
            actual_temp_observed_at: None,
        }
    }

    pub fn device_type(&self) -> DeviceType {
        match self.kind {
            DeviceKind::Unknown => DeviceType::Unknown,
            DeviceKind::Cube => DeviceType::Cube,
            DeviceKind::Wall => DeviceType::Wall,
            DeviceKind::Radiator(_) => DeviceType::Radiator,
        }
    }

    pub fn radiator(&self) -> Option<&RadiatorState> {
        match &self.kind {
            DeviceKind::Radiator(state) => Some(state),
            _ => None,
        }
    }

    /// Name if configured, otherwise the hex address
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format_address(self.address))
    }

    pub fn set_temp_celsius(&self) -> Option<f32> {
        (self.set_temp != SET_TEMP_UNKNOWN).then(|| f32::from(self.set_temp) / 2.0)
    }

    pub fn actual_temp_celsius(&self) -> Option<f32> {
        (self.actual_temp != ACTUAL_TEMP_UNKNOWN).then(|| f32::from(self.actual_temp) / 10.0)
    }

    /// Record a wall thermostat report.
    pub fn apply_wall_state(&mut self, set_temp: u8, actual_temp: u16, now: DateTime<Utc>) {
        self.set_temp = set_temp;
        self.actual_temp = actual_temp;
        self.actual_temp_observed_at = Some(now);
    }

    /// Record a radiator thermostat report.
    ///
    /// `actual_temp` of 0 means the report carried no measurement. A device
    /// of unknown type becomes a radiator; cubes and wall thermostats keep
    /// their type and only take the temperatures.
    pub fn apply_thermostat_state(
        &mut self,
        mode: Mode,
        valve_pos_percent: u8,
        set_temp: u8,
        actual_temp: u16,
        now: DateTime<Utc>,
    ) {
        if self.kind == DeviceKind::Unknown {
            self.kind = DeviceKind::Radiator(RadiatorState::default());
        }
        if let DeviceKind::Radiator(state) = &mut self.kind {
            state.mode = mode;
            state.valve_pos_percent = valve_pos_percent;
        }

        self.set_temp = set_temp;
        if actual_temp != 0 {
            self.actual_temp = actual_temp;
            self.actual_temp_observed_at = Some(now);
        }
    }
}

/// Fixed-capacity table of known devices
#[derive(Debug)]
pub struct DeviceRegistry {
    slots: Vec<Option<Device>>,
    full_throttle: LogThrottle,
}

impl DeviceRegistry {
    /// Creates an empty registry with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            full_throttle: LogThrottle::default(),
        }
    }

    /// Creates a registry seeded with the configured devices.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, MaxError> {
        let mut registry = Self::new(config.capacity);
        for known in &config.devices {
            registry.seed(known.address, known.device_type, known.name.clone())?;
        }
        Ok(registry)
    }

    /// Occupy the next free slot with a known device.
    pub fn seed(
        &mut self,
        address: u32,
        device_type: DeviceType,
        name: Option<String>,
    ) -> Result<DeviceSlot, MaxError> {
        if address == 0 || address > ADDRESS_MAX {
            return Err(MaxError::InvalidConfig(format!(
                "device address {address:#X} is not a valid 24-bit address"
            )));
        }
        if self.find(address).is_some() {
            return Err(MaxError::InvalidConfig(format!(
                "device {} configured twice",
                format_address(address)
            )));
        }
        let index = self.first_free().ok_or_else(|| {
            MaxError::InvalidConfig(format!(
                "more devices configured than the {} available slots",
                self.capacity()
            ))
        })?;

        self.slots[index] = Some(Device::new(address, device_type, name));
        Ok(DeviceSlot(index))
    }

    /// Look up `address`, claiming a free slot for it if it is new.
    ///
    /// A newly claimed slot gets `inferred_type` and unknown readings.
    /// Address 0 never resolves; neither does a new address once every
    /// slot is taken.
    pub fn resolve_slot(&mut self, address: u32, inferred_type: DeviceType) -> Option<DeviceSlot> {
        if address == 0 {
            return None;
        }
        if let Some(slot) = self.find(address) {
            return Some(slot);
        }

        match self.first_free() {
            Some(index) => {
                log::debug!(
                    "Registry: claimed slot {index} for {} ({inferred_type})",
                    format_address(address)
                );
                self.slots[index] = Some(Device::new(address, inferred_type, None));
                Some(DeviceSlot(index))
            }
            None => {
                if self.full_throttle.allow() {
                    log::warn!(
                        "Registry full ({} slots), not tracking {}",
                        self.capacity(),
                        format_address(address)
                    );
                }
                None
            }
        }
    }

    /// [`resolve_slot`](Self::resolve_slot), handing out the device itself.
    pub fn resolve(&mut self, address: u32, inferred_type: DeviceType) -> Option<&mut Device> {
        let slot = self.resolve_slot(address, inferred_type)?;
        self.device_mut(slot)
    }

    pub fn device(&self, slot: DeviceSlot) -> Option<&Device> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    pub fn device_mut(&mut self, slot: DeviceSlot) -> Option<&mut Device> {
        self.slots.get_mut(slot.0).and_then(Option::as_mut)
    }

    /// Look up an address without claiming a slot.
    pub fn get(&self, address: u32) -> Option<&Device> {
        self.find(address).and_then(|slot| self.device(slot))
    }

    /// Occupied slots in claim order.
    pub fn iter(&self) -> impl Iterator<Item = (DeviceSlot, &Device)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|device| (DeviceSlot(index), device)))
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.first_free().is_none()
    }

    fn find(&self, address: u32) -> Option<DeviceSlot> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(device) if device.address == address))
            .map(DeviceSlot)
    }

    fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_REGISTRY_CAPACITY)
    }
}
