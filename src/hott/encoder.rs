//! # HoTT Packet Encoders
//!
//! One encoder per module. Each reads a point-in-time value from every slot of
//! its capability set, applies the wire scale/offset, folds the result into
//! the encoder's running extrema and returns the checksummed reply.
//!
//! Each slot is read exactly once per packet. Different slots are updated by
//! independent producers, so a packet is consistent per field, not across
//! fields.
//!
//! Float-to-integer conversions truncate toward zero and saturate at the field
//! width: an altitude below -500 m encodes as 0, a temperature above 235 °C as
//! 255.

use std::sync::Arc;

use super::climb::{ClimbInterval, ClimbRates};
use super::extrema::{RunningMax, RunningMin};
use super::packet::{ElectricAirPacket, EscPacket, GpsPacket, HottPacket, VarioPacket};
use super::protocol::*;
use crate::sensors::registry::{
    read, ElectricAirSensors, EscSensors, GpsSensors, SensorRegistry, VarioSensors,
};

/// Builds the reply for one module
pub trait PacketEncoder: Send {
    /// Module this encoder answers for
    fn module(&self) -> Module;

    /// Build the complete reply from the current registry readings
    fn build(&mut self, registry: &SensorRegistry) -> Vec<u8>;

    /// Build the reply if the module is enabled, otherwise emit nothing
    fn respond(&mut self, registry: &SensorRegistry) -> Option<Vec<u8>> {
        if !registry.is_enabled(self.module()) {
            return None;
        }
        Some(self.build(registry))
    }
}

/// m → m + 500
pub fn altitude_field(meters: f32) -> u16 {
    (meters + ALTITUDE_OFFSET_M) as u16
}

/// °C → °C + 20
pub fn temperature_field(celsius: f32) -> u8 {
    (celsius + TEMPERATURE_OFFSET_C) as u8
}

/// V → 0.1 V steps
pub fn voltage_field(volts: f32) -> u16 {
    (volts * VOLTAGE_SCALE) as u16
}

/// A → 0.1 A steps
pub fn current_field(amps: f32) -> u16 {
    (amps * CURRENT_SCALE) as u16
}

/// mAh → 10 mAh steps
pub fn capacity_field(mah: f32) -> u16 {
    (mah / CAPACITY_DIVISOR) as u16
}

/// rpm → 10 rpm steps
pub fn rpm_field(rpm: f32) -> u16 {
    (rpm / RPM_DIVISOR) as u16
}

/// ° → 2° steps
pub fn direction_field(degrees: f32) -> u8 {
    (degrees / DIRECTION_DIVISOR) as u8
}

/// A coordinate split into the GPS packet's hemisphere / deg-min / sec fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    /// 1 when the sign bit is set (south/west, including -0.0), else 0
    pub hemisphere: u8,
    /// whole degrees × 100 + minutes
    pub deg_min: u16,
    /// fractional minute × 60
    pub sec: u16,
}

impl Coordinate {
    /// Split signed decimal degrees into the GPS packet fields
    ///
    /// # Arguments
    ///
    /// * `degrees` - Latitude or longitude; negative means south or west
    ///
    /// # Returns
    ///
    /// * `Coordinate` - Hemisphere flag from the sign bit plus the magnitude
    ///   as degrees/minutes and seconds
    pub fn from_degrees(degrees: f64) -> Self {
        let hemisphere = u8::from(degrees.is_sign_negative());
        let magnitude = degrees.abs();
        let whole = magnitude.trunc();
        let minutes = (magnitude - whole) * 60.0;
        let total_minutes = magnitude * 60.0;

        Self {
            hemisphere,
            deg_min: (whole * 100.0 + minutes) as u16,
            sec: ((total_minutes - total_minutes.trunc()) * 60.0) as u16,
        }
    }
}

/// Vario encoder: altitude with session extrema plus the sampled climb rates
#[derive(Debug)]
pub struct VarioEncoder {
    climb: Arc<ClimbRates>,
    max_altitude: RunningMax<u16>,
    min_altitude: RunningMin<u16>,
}

impl VarioEncoder {
    pub fn new(climb: Arc<ClimbRates>) -> Self {
        Self {
            climb,
            max_altitude: RunningMax::new(),
            min_altitude: RunningMin::new(),
        }
    }

    pub fn packet(&mut self, sensors: &VarioSensors) -> VarioPacket {
        let mut packet = VarioPacket::default();

        if let Some(altitude) = read(&sensors.altitude) {
            packet.altitude = altitude_field(altitude);
            packet.max_altitude = self.max_altitude.update(packet.altitude);
            packet.min_altitude = self.min_altitude.update(packet.altitude);
        }

        packet.m1s = self.climb.get(ClimbInterval::OneSecond);
        packet.m3s = self.climb.get(ClimbInterval::ThreeSeconds);
        packet.m10s = self.climb.get(ClimbInterval::TenSeconds);
        packet
    }

    /// Forget the altitude extrema
    pub fn reset(&mut self) {
        self.max_altitude.reset();
        self.min_altitude.reset();
    }
}

impl PacketEncoder for VarioEncoder {
    fn module(&self) -> Module {
        Module::Vario
    }

    fn build(&mut self, registry: &SensorRegistry) -> Vec<u8> {
        self.packet(registry.vario()).encode()
    }
}

/// ESC encoder with session extrema for every tracked quantity
#[derive(Debug, Default)]
pub struct EscEncoder {
    min_input_volt: RunningMin<u16>,
    max_esc_temperature: RunningMax<u8>,
    max_current: RunningMax<u16>,
    max_rpm: RunningMax<u16>,
    max_speed: RunningMax<u16>,
    min_bec_voltage: RunningMin<u8>,
    min_bec_current: RunningMin<u8>,
    max_bec_current: RunningMax<u8>,
    max_bec_temperature: RunningMax<u8>,
    max_motor_or_ext_temperature: RunningMax<u8>,
}

impl EscEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packet(&mut self, sensors: &EscSensors) -> EscPacket {
        let mut packet = EscPacket::default();

        if let Some(voltage) = read(&sensors.voltage) {
            packet.input_volt = voltage_field(voltage);
            packet.min_input_volt = self.min_input_volt.update(packet.input_volt);
        }
        if let Some(consumption) = read(&sensors.consumption) {
            packet.capacity = capacity_field(consumption);
        }
        if let Some(temperature) = read(&sensors.temperature) {
            packet.esc_temperature = temperature_field(temperature);
            packet.max_esc_temperature = self.max_esc_temperature.update(packet.esc_temperature);
        }
        if let Some(current) = read(&sensors.current) {
            packet.current = current_field(current);
            packet.max_current = self.max_current.update(packet.current);
        }
        if let Some(rpm) = read(&sensors.rpm) {
            packet.rpm = rpm_field(rpm);
            packet.max_rpm = self.max_rpm.update(packet.rpm);
        }
        if let Some(speed) = read(&sensors.speed) {
            packet.speed = speed as u16;
            packet.max_speed = self.max_speed.update(packet.speed);
        }
        if let Some(voltage) = read(&sensors.voltage_bec) {
            packet.bec_voltage = (voltage * VOLTAGE_SCALE) as u8;
            packet.min_bec_voltage = self.min_bec_voltage.update(packet.bec_voltage);
        }
        if let Some(current) = read(&sensors.current_bec) {
            packet.bec_current = (current * CURRENT_SCALE) as u8;
            packet.min_bec_current = self.min_bec_current.update(packet.bec_current);
            packet.max_bec_current = self.max_bec_current.update(packet.bec_current);
        }
        if let Some(temperature) = read(&sensors.temperature_bec) {
            packet.bec_temperature = temperature_field(temperature);
            packet.max_bec_temperature = self.max_bec_temperature.update(packet.bec_temperature);
        }
        if let Some(temperature) = read(&sensors.temperature_ext) {
            packet.motor_or_ext_temperature = temperature_field(temperature);
            packet.max_motor_or_ext_temperature = self
                .max_motor_or_ext_temperature
                .update(packet.motor_or_ext_temperature);
        }

        packet
    }

    /// Forget every tracked extremum
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl PacketEncoder for EscEncoder {
    fn module(&self) -> Module {
        Module::Esc
    }

    fn build(&mut self, registry: &SensorRegistry) -> Vec<u8> {
        self.packet(registry.esc()).encode()
    }
}

/// Electric-air encoder: battery voltage, current, temperature and capacity
#[derive(Debug, Default)]
pub struct ElectricAirEncoder;

impl ElectricAirEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn packet(&self, sensors: &ElectricAirSensors) -> ElectricAirPacket {
        let mut packet = ElectricAirPacket::default();

        if let Some(voltage) = read(&sensors.battery_voltage) {
            packet.battery1 = voltage_field(voltage);
        }
        if let Some(current) = read(&sensors.current) {
            packet.current = current_field(current);
        }
        if let Some(temperature) = read(&sensors.battery_temperature) {
            packet.temp1 = temperature_field(temperature);
        }
        if let Some(consumption) = read(&sensors.consumption) {
            packet.capacity = capacity_field(consumption);
        }

        packet
    }
}

impl PacketEncoder for ElectricAirEncoder {
    fn module(&self) -> Module {
        Module::ElectricAir
    }

    fn build(&mut self, registry: &SensorRegistry) -> Vec<u8> {
        self.packet(registry.electric_air()).encode()
    }
}

/// GPS encoder: position, course, speed, altitude and satellites
#[derive(Debug, Default)]
pub struct GpsEncoder;

impl GpsEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn packet(&self, sensors: &GpsSensors) -> GpsPacket {
        let mut packet = GpsPacket::default();

        if let Some(direction) = read(&sensors.direction) {
            packet.flight_direction = direction_field(direction);
        }
        if let Some(speed) = read(&sensors.speed) {
            packet.gps_speed = speed as u16;
        }
        if let Some(latitude) = read(&sensors.latitude) {
            let latitude = Coordinate::from_degrees(latitude);
            packet.latitude_ns = latitude.hemisphere;
            packet.latitude_deg_min = latitude.deg_min;
            packet.latitude_sec = latitude.sec;
        }
        if let Some(longitude) = read(&sensors.longitude) {
            let longitude = Coordinate::from_degrees(longitude);
            packet.longitude_ew = longitude.hemisphere;
            packet.longitude_deg_min = longitude.deg_min;
            packet.longitude_sec = longitude.sec;
        }
        if let Some(altitude) = read(&sensors.altitude) {
            packet.altitude = altitude_field(altitude);
        }
        if let Some(satellites) = read(&sensors.satellites) {
            packet.num_sat = satellites as u8;
        }

        packet
    }
}

impl PacketEncoder for GpsEncoder {
    fn module(&self) -> Module {
        Module::Gps
    }

    fn build(&mut self, registry: &SensorRegistry) -> Vec<u8> {
        self.packet(registry.gps()).encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hott::checksum::checksum;
    use crate::sensors::slot::{slot, SlotWriter};

    fn vario_with_altitude(initial: f32) -> (SlotWriter<f32>, VarioSensors) {
        let (writer, reader) = slot(initial);
        (writer, VarioSensors { altitude: Some(reader) })
    }

    #[test]
    fn test_altitude_field() {
        assert_eq!(altitude_field(0.0), 500);
        assert_eq!(altitude_field(123.0), 623);
        assert_eq!(altitude_field(-20.0), 480);
        assert_eq!(altitude_field(-600.0), 0); // saturates
    }

    #[test]
    fn test_altitude_field_round_trip() {
        for meters in [-500, -12, 0, 1, 250, 4000] {
            let field = altitude_field(meters as f32);
            assert_eq!(field as i32 - 500, meters);
        }
    }

    #[test]
    fn test_temperature_field() {
        assert_eq!(temperature_field(0.0), 20);
        assert_eq!(temperature_field(25.0), 45);
        assert_eq!(temperature_field(-20.0), 0);
        assert_eq!(temperature_field(300.0), 255); // saturates
    }

    #[test]
    fn test_scaled_fields() {
        assert_eq!(voltage_field(16.5), 165);
        assert_eq!(current_field(12.5), 125);
        assert_eq!(capacity_field(2400.0), 240);
        assert_eq!(capacity_field(2409.0), 240); // 10 mAh steps truncate
        assert_eq!(rpm_field(12_000.0), 1200);
        assert_eq!(direction_field(90.0), 45);
        assert_eq!(direction_field(359.0), 179);
    }

    #[test]
    fn test_voltage_round_trip_within_quantization() {
        for volts in [0.0f32, 3.7, 11.1, 16.8, 25.2] {
            let decoded = voltage_field(volts) as f32 / 10.0;
            assert!((decoded - volts).abs() < 0.101);
        }
    }

    #[test]
    fn test_coordinate_north_east() {
        let coordinate = Coordinate::from_degrees(48.125);
        assert_eq!(coordinate.hemisphere, 0);
        assert_eq!(coordinate.deg_min, 4807);
        assert_eq!(coordinate.sec, 30);
    }

    #[test]
    fn test_coordinate_south_west() {
        let coordinate = Coordinate::from_degrees(-9.375);
        assert_eq!(coordinate.hemisphere, 1);
        assert_eq!(coordinate.deg_min, 922);
        assert_eq!(coordinate.sec, 30);
    }

    #[test]
    fn test_coordinate_zero_is_north() {
        let coordinate = Coordinate::from_degrees(0.0);
        assert_eq!(coordinate, Coordinate { hemisphere: 0, deg_min: 0, sec: 0 });
    }

    #[test]
    fn test_coordinate_negative_zero_is_south() {
        let coordinate = Coordinate::from_degrees(-0.0);
        assert_eq!(coordinate, Coordinate { hemisphere: 1, deg_min: 0, sec: 0 });
    }

    #[test]
    fn test_vario_zero_altitude() {
        let (_altitude, sensors) = vario_with_altitude(0.0);
        let mut encoder = VarioEncoder::new(Arc::new(ClimbRates::new()));
        let packet = encoder.packet(&sensors);

        assert_eq!(packet.altitude, 500);
        assert_eq!(packet.max_altitude, 500);
        assert_eq!(packet.min_altitude, 500);
        assert_eq!(packet.m1s, 30000);
        assert_eq!(packet.m3s, 30000);
        assert_eq!(packet.m10s, 30000);
    }

    #[test]
    fn test_vario_extrema_are_monotonic() {
        let (altitude, sensors) = vario_with_altitude(0.0);
        let mut encoder = VarioEncoder::new(Arc::new(ClimbRates::new()));

        let mut last_max = 0;
        let mut last_min = u16::MAX;
        for meters in [10.0, 50.0, -5.0, 30.0, 120.0, 0.0] {
            altitude.set(meters);
            let packet = encoder.packet(&sensors);
            assert!(packet.max_altitude >= last_max);
            assert!(packet.min_altitude <= last_min);
            last_max = packet.max_altitude;
            last_min = packet.min_altitude;
        }

        assert_eq!(last_max, 620);
        assert_eq!(last_min, 495);
    }

    #[test]
    fn test_vario_reset_forgets_extrema() {
        let (altitude, sensors) = vario_with_altitude(100.0);
        let mut encoder = VarioEncoder::new(Arc::new(ClimbRates::new()));
        encoder.packet(&sensors);

        encoder.reset();
        altitude.set(10.0);
        let packet = encoder.packet(&sensors);
        assert_eq!(packet.max_altitude, 510);
        assert_eq!(packet.min_altitude, 510);
    }

    #[test]
    fn test_vario_uses_climb_rates() {
        let rates = Arc::new(ClimbRates::new());
        rates.set(ClimbInterval::OneSecond, 31000);
        rates.set(ClimbInterval::ThreeSeconds, 29000);
        rates.set(ClimbInterval::TenSeconds, 30500);

        let mut encoder = VarioEncoder::new(Arc::clone(&rates));
        let packet = encoder.packet(&VarioSensors::default());

        assert_eq!(packet.m1s, 31000);
        assert_eq!(packet.m3s, 29000);
        assert_eq!(packet.m10s, 30500);
    }

    #[test]
    fn test_vario_absent_altitude_leaves_zero() {
        let mut encoder = VarioEncoder::new(Arc::new(ClimbRates::new()));
        let packet = encoder.packet(&VarioSensors::default());
        assert_eq!(packet.altitude, 0);
        assert_eq!(packet.max_altitude, 0);
        assert_eq!(packet.min_altitude, 0);
    }

    #[test]
    fn test_esc_transforms() {
        let (_v, voltage) = slot(16.5f32);
        let (_c, consumption) = slot(2400.0f32);
        let (_t, temperature) = slot(45.0f32);
        let (_i, current) = slot(12.5f32);
        let (_r, rpm) = slot(12_000.0f32);
        let (_s, speed) = slot(80.0f32);
        let (_bv, voltage_bec) = slot(5.5f32);
        let (_bi, current_bec) = slot(1.5f32);
        let (_bt, temperature_bec) = slot(30.0f32);
        let (_et, temperature_ext) = slot(60.0f32);

        let sensors = EscSensors {
            voltage: Some(voltage),
            consumption: Some(consumption),
            temperature: Some(temperature),
            current: Some(current),
            rpm: Some(rpm),
            speed: Some(speed),
            voltage_bec: Some(voltage_bec),
            current_bec: Some(current_bec),
            temperature_bec: Some(temperature_bec),
            temperature_ext: Some(temperature_ext),
        };

        let packet = EscEncoder::new().packet(&sensors);

        assert_eq!(packet.input_volt, 165);
        assert_eq!(packet.min_input_volt, 165);
        assert_eq!(packet.capacity, 240);
        assert_eq!(packet.esc_temperature, 65);
        assert_eq!(packet.max_esc_temperature, 65);
        assert_eq!(packet.current, 125);
        assert_eq!(packet.max_current, 125);
        assert_eq!(packet.rpm, 1200);
        assert_eq!(packet.max_rpm, 1200);
        assert_eq!(packet.speed, 80);
        assert_eq!(packet.max_speed, 80);
        assert_eq!(packet.bec_voltage, 55);
        assert_eq!(packet.min_bec_voltage, 55);
        assert_eq!(packet.bec_current, 15);
        assert_eq!(packet.min_bec_current, 15);
        assert_eq!(packet.max_bec_current, 15);
        assert_eq!(packet.bec_temperature, 50);
        assert_eq!(packet.max_bec_temperature, 50);
        assert_eq!(packet.motor_or_ext_temperature, 80);
        assert_eq!(packet.max_motor_or_ext_temperature, 80);
    }

    #[test]
    fn test_esc_extrema_across_builds() {
        let (voltage, voltage_r) = slot(16.0f32);
        let (current, current_r) = slot(10.0f32);
        let (current_bec, current_bec_r) = slot(2.0f32);
        let sensors = EscSensors {
            voltage: Some(voltage_r),
            current: Some(current_r),
            current_bec: Some(current_bec_r),
            ..Default::default()
        };
        let mut encoder = EscEncoder::new();

        let first = encoder.packet(&sensors);
        assert_eq!(first.min_input_volt, 160);
        assert_eq!(first.max_current, 100);

        voltage.set(14.0);
        current.set(30.0);
        current_bec.set(1.0);
        let second = encoder.packet(&sensors);
        assert_eq!(second.input_volt, 140);
        assert_eq!(second.min_input_volt, 140);
        assert_eq!(second.max_current, 300);
        assert_eq!(second.min_bec_current, 10);
        assert_eq!(second.max_bec_current, 20);

        voltage.set(15.0);
        current.set(5.0);
        current_bec.set(3.0);
        let third = encoder.packet(&sensors);
        assert_eq!(third.input_volt, 150);
        assert_eq!(third.min_input_volt, 140);
        assert_eq!(third.current, 50);
        assert_eq!(third.max_current, 300);
        assert_eq!(third.min_bec_current, 10);
        assert_eq!(third.max_bec_current, 30);
    }

    #[test]
    fn test_esc_absent_slots_leave_zero() {
        let (_rpm, rpm) = slot(5000.0f32);
        let sensors = EscSensors {
            rpm: Some(rpm),
            ..Default::default()
        };
        let packet = EscEncoder::new().packet(&sensors);

        assert_eq!(packet.rpm, 500);
        assert_eq!(
            packet,
            EscPacket {
                rpm: 500,
                max_rpm: 500,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_esc_reset() {
        let (_t, temperature) = slot(80.0f32);
        let sensors = EscSensors {
            temperature: Some(temperature),
            ..Default::default()
        };
        let mut encoder = EscEncoder::new();
        encoder.packet(&sensors);
        encoder.reset();

        let packet = encoder.packet(&EscSensors::default());
        assert_eq!(packet.max_esc_temperature, 0);
    }

    #[test]
    fn test_electric_air_transforms() {
        let (_v, battery_voltage) = slot(12.5f32);
        let (_i, current) = slot(20.5f32);
        let (_t, battery_temperature) = slot(30.0f32);
        let (_c, consumption) = slot(1500.0f32);
        let sensors = ElectricAirSensors {
            battery_voltage: Some(battery_voltage),
            current: Some(current),
            battery_temperature: Some(battery_temperature),
            consumption: Some(consumption),
        };

        let packet = ElectricAirEncoder::new().packet(&sensors);
        assert_eq!(packet.battery1, 125);
        assert_eq!(packet.current, 205);
        assert_eq!(packet.temp1, 50);
        assert_eq!(packet.capacity, 150);
        assert_eq!(packet.battery2, 0);
    }

    #[test]
    fn test_gps_transforms() {
        let (_d, direction) = slot(90.0f32);
        let (_s, speed) = slot(55.0f32);
        let (_la, latitude) = slot(48.125f64);
        let (_lo, longitude) = slot(-9.375f64);
        let (_a, altitude) = slot(120.0f32);
        let (_n, satellites) = slot(11.0f32);
        let sensors = GpsSensors {
            direction: Some(direction),
            speed: Some(speed),
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude: Some(altitude),
            satellites: Some(satellites),
        };

        let packet = GpsEncoder::new().packet(&sensors);
        assert_eq!(packet.flight_direction, 45);
        assert_eq!(packet.gps_speed, 55);
        assert_eq!(packet.latitude_ns, 0);
        assert_eq!(packet.latitude_deg_min, 4807);
        assert_eq!(packet.latitude_sec, 30);
        assert_eq!(packet.longitude_ew, 1);
        assert_eq!(packet.longitude_deg_min, 922);
        assert_eq!(packet.longitude_sec, 30);
        assert_eq!(packet.altitude, 620);
        assert_eq!(packet.num_sat, 11);
    }

    #[test]
    fn test_gps_longitude_uses_its_own_magnitude() {
        let (_la, latitude) = slot(10.5f64);
        let (_lo, longitude) = slot(20.25f64);
        let sensors = GpsSensors {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        };

        let packet = GpsEncoder::new().packet(&sensors);
        assert_eq!(packet.latitude_deg_min, 1030);
        assert_eq!(packet.longitude_deg_min, 2015);
    }

    #[test]
    fn test_gps_absent_slots_leave_zero() {
        let packet = GpsEncoder::new().packet(&GpsSensors::default());
        assert_eq!(packet, GpsPacket::default());
    }

    #[test]
    fn test_respond_disabled_module_emits_nothing() {
        let registry = SensorRegistry::new().with_esc(EscSensors::default());
        let mut encoder = VarioEncoder::new(Arc::new(ClimbRates::new()));
        assert!(encoder.respond(&registry).is_none());
        assert!(EscEncoder::new().respond(&registry).is_some());
    }

    #[test]
    fn test_respond_enabled_modules_emit_framed_packets() {
        let registry = SensorRegistry::new()
            .with_vario(VarioSensors::default())
            .with_esc(EscSensors::default())
            .with_electric_air(ElectricAirSensors::default())
            .with_gps(GpsSensors::default());

        let mut encoders: Vec<Box<dyn PacketEncoder>> = vec![
            Box::new(VarioEncoder::new(Arc::new(ClimbRates::new()))),
            Box::new(EscEncoder::new()),
            Box::new(ElectricAirEncoder::new()),
            Box::new(GpsEncoder::new()),
        ];

        for encoder in encoders.iter_mut() {
            let bytes = encoder.respond(&registry).unwrap();
            assert_eq!(bytes.len(), HOTT_PACKET_LENGTH);
            assert_eq!(bytes[0], HOTT_START_BYTE);
            assert_eq!(bytes[1], encoder.module().address());
            assert_eq!(bytes[3], encoder.module().sensor_id());
            assert_eq!(bytes[43], HOTT_END_BYTE);
            assert_eq!(bytes[44], checksum(&bytes[..44]));
        }
    }
}
