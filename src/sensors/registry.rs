//! # Sensor Registry
//!
//! The set of live readings the encoders draw from, grouped per HoTT module.
//!
//! A module is enabled by installing its capability set once at startup;
//! individual slots inside a set may be absent when no producer supplies that
//! quantity. Encoders treat an absent slot as a zero field, never an error.
//!
//! ```
//! use hott_responder::hott::protocol::Module;
//! use hott_responder::sensors::registry::{SensorRegistry, VarioSensors};
//! use hott_responder::sensors::slot::slot;
//!
//! let (altitude, reader) = slot(0.0f32);
//! let registry = SensorRegistry::new().with_vario(VarioSensors {
//!     altitude: Some(reader),
//! });
//!
//! altitude.set(120.0);
//! assert!(registry.is_enabled(Module::Vario));
//! assert!(!registry.is_enabled(Module::Esc));
//! ```

use super::slot::{SlotReader, SlotValue};
use crate::hott::protocol::Module;

/// Optional slot holding a single-precision reading
pub type Reading = Option<SlotReader<f32>>;

/// Read an optional slot once
pub fn read<T: SlotValue>(slot: &Option<SlotReader<T>>) -> Option<T> {
    slot.as_ref().map(SlotReader::get)
}

/// Variometer readings
#[derive(Debug, Clone, Default)]
pub struct VarioSensors {
    /// Barometric altitude (m)
    pub altitude: Reading,
}

/// ESC readings
#[derive(Debug, Clone, Default)]
pub struct EscSensors {
    /// Input voltage (V)
    pub voltage: Reading,
    /// Consumed capacity (mAh)
    pub consumption: Reading,
    /// FET temperature (°C)
    pub temperature: Reading,
    /// Motor current (A)
    pub current: Reading,
    /// Motor speed (rpm)
    pub rpm: Reading,
    /// Air or ground speed (km/h)
    pub speed: Reading,
    /// BEC voltage (V)
    pub voltage_bec: Reading,
    /// BEC current (A)
    pub current_bec: Reading,
    /// BEC temperature (°C)
    pub temperature_bec: Reading,
    /// Motor or external temperature (°C)
    pub temperature_ext: Reading,
}

/// Electric-air (battery) readings
#[derive(Debug, Clone, Default)]
pub struct ElectricAirSensors {
    /// Battery 1 voltage (V)
    pub battery_voltage: Reading,
    /// Battery current (A)
    pub current: Reading,
    /// Battery 1 temperature (°C)
    pub battery_temperature: Reading,
    /// Consumed capacity (mAh)
    pub consumption: Reading,
}

/// GPS readings
#[derive(Debug, Clone, Default)]
pub struct GpsSensors {
    /// Course over ground (°)
    pub direction: Reading,
    /// Ground speed (km/h)
    pub speed: Reading,
    /// Latitude (decimal degrees, negative south)
    pub latitude: Option<SlotReader<f64>>,
    /// Longitude (decimal degrees, negative west)
    pub longitude: Option<SlotReader<f64>>,
    /// Altitude (m)
    pub altitude: Reading,
    /// Satellites in use
    pub satellites: Reading,
}

/// All module readings plus the per-module enabled flags
#[derive(Debug, Clone, Default)]
pub struct SensorRegistry {
    enabled: [bool; 4],
    vario: VarioSensors,
    esc: EscSensors,
    electric_air: ElectricAirSensors,
    gps: GpsSensors,
}

impl SensorRegistry {
    /// Empty registry with every module disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the vario capability set and enable the vario module
    pub fn with_vario(mut self, sensors: VarioSensors) -> Self {
        self.vario = sensors;
        self.enabled[Module::Vario.index()] = true;
        self
    }

    /// Install the ESC capability set and enable the ESC module
    pub fn with_esc(mut self, sensors: EscSensors) -> Self {
        self.esc = sensors;
        self.enabled[Module::Esc.index()] = true;
        self
    }

    /// Install the electric-air capability set and enable the module
    pub fn with_electric_air(mut self, sensors: ElectricAirSensors) -> Self {
        self.electric_air = sensors;
        self.enabled[Module::ElectricAir.index()] = true;
        self
    }

    /// Install the GPS capability set and enable the GPS module
    pub fn with_gps(mut self, sensors: GpsSensors) -> Self {
        self.gps = sensors;
        self.enabled[Module::Gps.index()] = true;
        self
    }

    /// Whether any producer feeds `module`
    pub fn is_enabled(&self, module: Module) -> bool {
        self.enabled[module.index()]
    }

    /// Modules that will answer polls
    pub fn enabled_modules(&self) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|module| self.is_enabled(*module))
            .collect()
    }

    pub fn vario(&self) -> &VarioSensors {
        &self.vario
    }

    pub fn esc(&self) -> &EscSensors {
        &self.esc
    }

    pub fn electric_air(&self) -> &ElectricAirSensors {
        &self.electric_air
    }

    pub fn gps(&self) -> &GpsSensors {
        &self.gps
    }
}
