//! # HoTT Packet Layouts
//!
//! The four 45-byte reply layouts, field for field, in wire order.
//!
//! Every layout starts with the start byte, module address, alarm byte and
//! sensor text ID, and ends with the version byte, end byte and checksum.
//! Multi-byte fields are little-endian. Fields this responder has no data for
//! stay zero.

use bytes::{BufMut, BytesMut};

use super::checksum::checksum;
use super::protocol::*;

/// A reply layout that can be serialized to the wire
pub trait HottPacket {
    /// Module this layout belongs to
    fn module(&self) -> Module;

    /// Write every byte from the start byte through the version byte
    fn write_body(&self, buf: &mut BytesMut);

    /// Serialize into a complete 45-byte reply with end byte and checksum
    fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(HOTT_PACKET_LENGTH);
        self.write_body(&mut buf);
        buf.put_u8(HOTT_END_BYTE);

        let crc = checksum(&buf);
        buf.put_u8(crc);

        debug_assert_eq!(buf.len(), HOTT_PACKET_LENGTH);
        buf.to_vec()
    }
}

fn put_header(buf: &mut BytesMut, module: Module, alarm: u8) {
    buf.put_u8(HOTT_START_BYTE);
    buf.put_u8(module.address());
    buf.put_u8(alarm);
    buf.put_u8(module.sensor_id());
}

/// Vario module reply (0x89)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarioPacket {
    pub warning_id: u8,
    pub alarm_inverse: u8,
    /// m + 500
    pub altitude: u16,
    pub max_altitude: u16,
    pub min_altitude: u16,
    /// Δm × 100 + 30000 over 1 s
    pub m1s: u16,
    /// Δm × 100 + 30000 over 3 s
    pub m3s: u16,
    /// Δm × 100 + 30000 over 10 s
    pub m10s: u16,
    pub text: [u8; 24],
    pub empty: u8,
    pub version: u8,
}

impl HottPacket for VarioPacket {
    fn module(&self) -> Module {
        Module::Vario
    }

    fn write_body(&self, buf: &mut BytesMut) {
        put_header(buf, Module::Vario, self.warning_id);
        buf.put_u8(self.alarm_inverse);
        buf.put_u16_le(self.altitude);
        buf.put_u16_le(self.max_altitude);
        buf.put_u16_le(self.min_altitude);
        buf.put_u16_le(self.m1s);
        buf.put_u16_le(self.m3s);
        buf.put_u16_le(self.m10s);
        buf.put_slice(&self.text);
        buf.put_u8(self.empty);
        buf.put_u8(self.version);
    }
}

/// ESC module reply (0x8C)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscPacket {
    pub warning_id: u8,
    pub inverse: u8,
    pub inverse_status: u8,
    /// 0.1 V
    pub input_volt: u16,
    pub min_input_volt: u16,
    /// 10 mAh
    pub capacity: u16,
    /// °C + 20
    pub esc_temperature: u8,
    pub max_esc_temperature: u8,
    /// 0.1 A
    pub current: u16,
    pub max_current: u16,
    /// 10 rpm
    pub rpm: u16,
    pub max_rpm: u16,
    pub throttle_percent: u8,
    /// km/h
    pub speed: u16,
    pub max_speed: u16,
    /// 0.1 V
    pub bec_voltage: u8,
    pub min_bec_voltage: u8,
    /// 0.1 A
    pub bec_current: u8,
    pub min_bec_current: u8,
    pub max_bec_current: u8,
    pub pwm: u8,
    /// °C + 20
    pub bec_temperature: u8,
    pub max_bec_temperature: u8,
    /// °C + 20
    pub motor_or_ext_temperature: u8,
    pub max_motor_or_ext_temperature: u8,
    pub rpm_without_gear_or_ext: u16,
    pub timing: u8,
    pub advanced_timing: u8,
    pub highest_current_motor_number: u8,
    pub version: u8,
}

impl HottPacket for EscPacket {
    fn module(&self) -> Module {
        Module::Esc
    }

    fn write_body(&self, buf: &mut BytesMut) {
        put_header(buf, Module::Esc, self.warning_id);
        buf.put_u8(self.inverse);
        buf.put_u8(self.inverse_status);
        buf.put_u16_le(self.input_volt);
        buf.put_u16_le(self.min_input_volt);
        buf.put_u16_le(self.capacity);
        buf.put_u8(self.esc_temperature);
        buf.put_u8(self.max_esc_temperature);
        buf.put_u16_le(self.current);
        buf.put_u16_le(self.max_current);
        buf.put_u16_le(self.rpm);
        buf.put_u16_le(self.max_rpm);
        buf.put_u8(self.throttle_percent);
        buf.put_u16_le(self.speed);
        buf.put_u16_le(self.max_speed);
        buf.put_u8(self.bec_voltage);
        buf.put_u8(self.min_bec_voltage);
        buf.put_u8(self.bec_current);
        buf.put_u8(self.min_bec_current);
        buf.put_u8(self.max_bec_current);
        buf.put_u8(self.pwm);
        buf.put_u8(self.bec_temperature);
        buf.put_u8(self.max_bec_temperature);
        buf.put_u8(self.motor_or_ext_temperature);
        buf.put_u8(self.max_motor_or_ext_temperature);
        buf.put_u16_le(self.rpm_without_gear_or_ext);
        buf.put_u8(self.timing);
        buf.put_u8(self.advanced_timing);
        buf.put_u8(self.highest_current_motor_number);
        buf.put_u8(self.version);
    }
}

/// Electric-air module reply (0x8E)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElectricAirPacket {
    pub alarm_tone: u8,
    pub alarm_inverse1: u8,
    pub alarm_inverse2: u8,
    /// Low cell voltages, 0.02 V
    pub cell_low: [u8; 7],
    /// High cell voltages, 0.02 V
    pub cell_high: [u8; 7],
    /// 0.1 V
    pub battery1: u16,
    pub battery2: u16,
    /// °C + 20
    pub temp1: u8,
    pub temp2: u8,
    /// m + 500
    pub height: u16,
    /// 0.1 A
    pub current: u16,
    pub drive_voltage: u16,
    /// 10 mAh
    pub capacity: u16,
    pub m2s: u16,
    pub m3s: u8,
    pub rpm: u16,
    pub minutes: u8,
    pub seconds: u8,
    pub speed: u8,
    pub version: u8,
}

impl HottPacket for ElectricAirPacket {
    fn module(&self) -> Module {
        Module::ElectricAir
    }

    fn write_body(&self, buf: &mut BytesMut) {
        put_header(buf, Module::ElectricAir, self.alarm_tone);
        buf.put_u8(self.alarm_inverse1);
        buf.put_u8(self.alarm_inverse2);
        buf.put_slice(&self.cell_low);
        buf.put_slice(&self.cell_high);
        buf.put_u16_le(self.battery1);
        buf.put_u16_le(self.battery2);
        buf.put_u8(self.temp1);
        buf.put_u8(self.temp2);
        buf.put_u16_le(self.height);
        buf.put_u16_le(self.current);
        buf.put_u16_le(self.drive_voltage);
        buf.put_u16_le(self.capacity);
        buf.put_u16_le(self.m2s);
        buf.put_u8(self.m3s);
        buf.put_u16_le(self.rpm);
        buf.put_u8(self.minutes);
        buf.put_u8(self.seconds);
        buf.put_u8(self.speed);
        buf.put_u8(self.version);
    }
}

/// GPS module reply (0x8A)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpsPacket {
    pub alarm_tone: u8,
    pub alarm_inverse1: u8,
    pub alarm_inverse2: u8,
    /// 2° steps
    pub flight_direction: u8,
    /// km/h
    pub gps_speed: u16,
    /// 0 = north, 1 = south
    pub latitude_ns: u8,
    /// degrees × 100 + minutes
    pub latitude_deg_min: u16,
    pub latitude_sec: u16,
    /// 0 = east, 1 = west
    pub longitude_ew: u8,
    pub longitude_deg_min: u16,
    pub longitude_sec: u16,
    pub distance: u16,
    /// m + 500
    pub altitude: u16,
    pub climbrate: u16,
    pub climbrate3s: u8,
    pub num_sat: u8,
    pub fix_char: u8,
    pub home_direction: u8,
    pub angle_x: u8,
    pub angle_y: u8,
    pub angle_z: u8,
    pub time_h: u8,
    pub time_m: u8,
    pub time_s: u8,
    pub time_sss: u8,
    pub msl_altitude: u16,
    pub vibration: u8,
    pub ascii4: u8,
    pub ascii5: u8,
    pub gps_fix: u8,
    pub version: u8,
}

impl HottPacket for GpsPacket {
    fn module(&self) -> Module {
        Module::Gps
    }

    fn write_body(&self, buf: &mut BytesMut) {
        put_header(buf, Module::Gps, self.alarm_tone);
        buf.put_u8(self.alarm_inverse1);
        buf.put_u8(self.alarm_inverse2);
        buf.put_u8(self.flight_direction);
        buf.put_u16_le(self.gps_speed);
        buf.put_u8(self.latitude_ns);
        buf.put_u16_le(self.latitude_deg_min);
        buf.put_u16_le(self.latitude_sec);
        buf.put_u8(self.longitude_ew);
        buf.put_u16_le(self.longitude_deg_min);
        buf.put_u16_le(self.longitude_sec);
        buf.put_u16_le(self.distance);
        buf.put_u16_le(self.altitude);
        buf.put_u16_le(self.climbrate);
        buf.put_u8(self.climbrate3s);
        buf.put_u8(self.num_sat);
        buf.put_u8(self.fix_char);
        buf.put_u8(self.home_direction);
        buf.put_u8(self.angle_x);
        buf.put_u8(self.angle_y);
        buf.put_u8(self.angle_z);
        buf.put_u8(self.time_h);
        buf.put_u8(self.time_m);
        buf.put_u8(self.time_s);
        buf.put_u8(self.time_sss);
        buf.put_u16_le(self.msl_altitude);
        buf.put_u8(self.vibration);
        buf.put_u8(self.ascii4);
        buf.put_u8(self.ascii5);
        buf.put_u8(self.gps_fix);
        buf.put_u8(self.version);
    }
}
