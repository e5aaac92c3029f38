//! # HoTT Protocol Constants and Types
//!
//! Core protocol definitions for Graupner HoTT binary telemetry.
//!
//! ## Link
//!
//! Single-wire half-duplex UART at 19200 baud, 8N1. The receiver sends a
//! two-byte poll (`0x80`, module address); the addressed sensor answers with a
//! 45-byte little-endian packet framed by `0x7C` ... `0x7D` and closed by an
//! additive checksum.
//!
//! ## Fixed-point wire units
//!
//! | Quantity | Native | Wire |
//! |----------|--------|------|
//! | Altitude | m | m + 500 |
//! | Temperature | °C | °C + 20 |
//! | Voltage | V | 0.1 V steps |
//! | Current | A | 0.1 A steps |
//! | Capacity | mAh | 10 mAh steps |
//! | RPM | rpm | 10 rpm steps |
//! | Direction | ° | 2° steps |
//! | Climb rate | m | Δm × 100 + 30000 |

use std::fmt;

/// HoTT link baud rate
pub const HOTT_BAUD_RATE: u32 = 19_200;

/// Line idle time that closes an inbound request frame (microseconds)
pub const HOTT_IDLE_TIMEOUT_US: u64 = 2_000;

/// First byte of a binary-mode poll
pub const HOTT_BINARY_MODE_REQUEST_ID: u8 = 0x80;

/// First byte of a text-mode poll (recognised, never answered)
pub const HOTT_TEXT_MODE_REQUEST_ID: u8 = 0x7F;

/// Shortest accepted request frame
pub const HOTT_REQUEST_MIN_LENGTH: usize = 2;

/// Longest accepted request frame
pub const HOTT_REQUEST_MAX_LENGTH: usize = 3;

/// Reply start byte
pub const HOTT_START_BYTE: u8 = 0x7C;

/// Reply end byte, followed by the checksum
pub const HOTT_END_BYTE: u8 = 0x7D;

/// Every reply packet is 45 bytes, checksum included
pub const HOTT_PACKET_LENGTH: usize = 45;

/// Module addresses (byte 1 of the poll, byte 1 of the reply)
pub const HOTT_VARIO_MODULE_ID: u8 = 0x89;
pub const HOTT_GPS_MODULE_ID: u8 = 0x8A;
pub const HOTT_ESC_MODULE_ID: u8 = 0x8C;
pub const HOTT_ELECTRIC_AIR_MODULE_ID: u8 = 0x8E;

/// Sensor text IDs (byte 3 of the reply)
pub const HOTT_VARIO_SENSOR_ID: u8 = 0x90;
pub const HOTT_GPS_SENSOR_ID: u8 = 0xA0;
pub const HOTT_ESC_SENSOR_ID: u8 = 0xC0;
pub const HOTT_ELECTRIC_AIR_SENSOR_ID: u8 = 0xE0;

/// Altitude offset in meters (500 == 0 m)
pub const ALTITUDE_OFFSET_M: f32 = 500.0;

/// Temperature offset in °C (20 == 0 °C)
pub const TEMPERATURE_OFFSET_C: f32 = 20.0;

/// Volts to 0.1 V steps
pub const VOLTAGE_SCALE: f32 = 10.0;

/// Amps to 0.1 A steps
pub const CURRENT_SCALE: f32 = 10.0;

/// mAh to 10 mAh steps
pub const CAPACITY_DIVISOR: f32 = 10.0;

/// rpm to 10 rpm steps
pub const RPM_DIVISOR: f32 = 10.0;

/// Degrees to 2° steps
pub const DIRECTION_DIVISOR: f32 = 2.0;

/// Meters of altitude change to 0.01 m steps
pub const CLIMB_RATE_SCALE: f32 = 100.0;

/// Wire value for zero climb
pub const CLIMB_RATE_ZERO: u16 = 30_000;

/// A HoTT sensor module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Vario,
    Gps,
    Esc,
    ElectricAir,
}

impl Module {
    /// All modules this responder can emulate
    pub const ALL: [Module; 4] = [Module::Vario, Module::Gps, Module::Esc, Module::ElectricAir];

    /// Address the receiver polls
    pub fn address(self) -> u8 {
        match self {
            Module::Vario => HOTT_VARIO_MODULE_ID,
            Module::Gps => HOTT_GPS_MODULE_ID,
            Module::Esc => HOTT_ESC_MODULE_ID,
            Module::ElectricAir => HOTT_ELECTRIC_AIR_MODULE_ID,
        }
    }

    /// Sensor text ID written into byte 3 of the reply
    pub fn sensor_id(self) -> u8 {
        match self {
            Module::Vario => HOTT_VARIO_SENSOR_ID,
            Module::Gps => HOTT_GPS_SENSOR_ID,
            Module::Esc => HOTT_ESC_SENSOR_ID,
            Module::ElectricAir => HOTT_ELECTRIC_AIR_SENSOR_ID,
        }
    }

    /// Look up the module polled at `address`
    ///
    /// Returns `None` for unknown addresses, including the general-air module
    /// (0x8D) which this responder never emulates.
    pub fn from_address(address: u8) -> Option<Self> {
        match address {
            HOTT_VARIO_MODULE_ID => Some(Module::Vario),
            HOTT_GPS_MODULE_ID => Some(Module::Gps),
            HOTT_ESC_MODULE_ID => Some(Module::Esc),
            HOTT_ELECTRIC_AIR_MODULE_ID => Some(Module::ElectricAir),
            _ => None,
        }
    }

    /// Short lowercase name used in logs
    pub fn name(self) -> &'static str {
        match self {
            Module::Vario => "vario",
            Module::Gps => "gps",
            Module::Esc => "esc",
            Module::ElectricAir => "electric_air",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Module::Vario => 0,
            Module::Gps => 1,
            Module::Esc => 2,
            Module::ElectricAir => 3,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of an inbound poll, classified from its first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Binary telemetry poll carrying a module address
    Binary(u8),
    /// Text-mode (menu) poll; carries the text-mode address byte
    Text(u8),
}
