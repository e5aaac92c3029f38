//! # Simulated Producers
//!
//! Assembles a [`SensorRegistry`] for the configured modules and keeps the
//! producer halves of every slot. With simulation enabled, a background task
//! publishes slowly varying synthetic readings so a receiver shows live data
//! on the bench; without it the readings stay frozen at zero.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::registry::{ElectricAirSensors, EscSensors, GpsSensors, SensorRegistry, VarioSensors};
use super::slot::{slot, SlotWriter};
use crate::config::SensorsConfig;

/// Producer halves for every slot installed in the registry
#[derive(Debug, Default)]
pub struct SimulatedSensors {
    altitude: Option<SlotWriter<f32>>,
    esc: Option<EscWriters>,
    electric_air: Option<ElectricAirWriters>,
    gps: Option<GpsWriters>,
}

#[derive(Debug)]
struct EscWriters {
    voltage: SlotWriter<f32>,
    consumption: SlotWriter<f32>,
    temperature: SlotWriter<f32>,
    current: SlotWriter<f32>,
    rpm: SlotWriter<f32>,
    speed: SlotWriter<f32>,
    voltage_bec: SlotWriter<f32>,
    current_bec: SlotWriter<f32>,
    temperature_bec: SlotWriter<f32>,
    temperature_ext: SlotWriter<f32>,
}

#[derive(Debug)]
struct ElectricAirWriters {
    battery_voltage: SlotWriter<f32>,
    current: SlotWriter<f32>,
    battery_temperature: SlotWriter<f32>,
    consumption: SlotWriter<f32>,
}

#[derive(Debug)]
struct GpsWriters {
    direction: SlotWriter<f32>,
    speed: SlotWriter<f32>,
    latitude: SlotWriter<f64>,
    longitude: SlotWriter<f64>,
    altitude: SlotWriter<f32>,
    satellites: SlotWriter<f32>,
}

/// Build the registry for the modules enabled in `config`
///
/// Every slot of an enabled module is installed, seeded at zero.
pub fn build_registry(config: &SensorsConfig) -> (SensorRegistry, SimulatedSensors) {
    let mut registry = SensorRegistry::new();
    let mut producers = SimulatedSensors::default();

    if config.vario {
        let (writer, reader) = slot(0.0f32);
        registry = registry.with_vario(VarioSensors { altitude: Some(reader) });
        producers.altitude = Some(writer);
    }

    if config.esc {
        let (voltage, voltage_r) = slot(0.0f32);
        let (consumption, consumption_r) = slot(0.0f32);
        let (temperature, temperature_r) = slot(0.0f32);
        let (current, current_r) = slot(0.0f32);
        let (rpm, rpm_r) = slot(0.0f32);
        let (speed, speed_r) = slot(0.0f32);
        let (voltage_bec, voltage_bec_r) = slot(0.0f32);
        let (current_bec, current_bec_r) = slot(0.0f32);
        let (temperature_bec, temperature_bec_r) = slot(0.0f32);
        let (temperature_ext, temperature_ext_r) = slot(0.0f32);

        registry = registry.with_esc(EscSensors {
            voltage: Some(voltage_r),
            consumption: Some(consumption_r),
            temperature: Some(temperature_r),
            current: Some(current_r),
            rpm: Some(rpm_r),
            speed: Some(speed_r),
            voltage_bec: Some(voltage_bec_r),
            current_bec: Some(current_bec_r),
            temperature_bec: Some(temperature_bec_r),
            temperature_ext: Some(temperature_ext_r),
        });
        producers.esc = Some(EscWriters {
            voltage,
            consumption,
            temperature,
            current,
            rpm,
            speed,
            voltage_bec,
            current_bec,
            temperature_bec,
            temperature_ext,
        });
    }

    if config.electric_air {
        let (battery_voltage, battery_voltage_r) = slot(0.0f32);
        let (current, current_r) = slot(0.0f32);
        let (battery_temperature, battery_temperature_r) = slot(0.0f32);
        let (consumption, consumption_r) = slot(0.0f32);

        registry = registry.with_electric_air(ElectricAirSensors {
            battery_voltage: Some(battery_voltage_r),
            current: Some(current_r),
            battery_temperature: Some(battery_temperature_r),
            consumption: Some(consumption_r),
        });
        producers.electric_air = Some(ElectricAirWriters {
            battery_voltage,
            current,
            battery_temperature,
            consumption,
        });
    }

    if config.gps {
        let (direction, direction_r) = slot(0.0f32);
        let (speed, speed_r) = slot(0.0f32);
        let (latitude, latitude_r) = slot(0.0f64);
        let (longitude, longitude_r) = slot(0.0f64);
        let (altitude, altitude_r) = slot(0.0f32);
        let (satellites, satellites_r) = slot(0.0f32);

        registry = registry.with_gps(GpsSensors {
            direction: Some(direction_r),
            speed: Some(speed_r),
            latitude: Some(latitude_r),
            longitude: Some(longitude_r),
            altitude: Some(altitude_r),
            satellites: Some(satellites_r),
        });
        producers.gps = Some(GpsWriters {
            direction,
            speed,
            latitude,
            longitude,
            altitude,
            satellites,
        });
    }

    debug!("Assembled sensor registry: {:?}", registry.enabled_modules());
    (registry, producers)
}

impl SimulatedSensors {
    /// Publish the synthetic readings for `t` seconds since start
    pub fn update(&self, t: f32) {
        let wave = (t / 10.0).sin();

        if let Some(altitude) = &self.altitude {
            altitude.set(100.0 + 20.0 * wave);
        }

        if let Some(esc) = &self.esc {
            let throttle = 0.5 + 0.5 * (t / 7.0).sin();
            esc.voltage.set(16.8 - 0.002 * t);
            esc.consumption.set(2.5 * t);
            esc.temperature.set(35.0 + 15.0 * throttle);
            esc.current.set(40.0 * throttle);
            esc.rpm.set(24_000.0 * throttle);
            esc.speed.set(80.0 * throttle);
            esc.voltage_bec.set(5.1);
            esc.current_bec.set(1.0 + throttle);
            esc.temperature_bec.set(30.0 + 5.0 * throttle);
            esc.temperature_ext.set(28.0 + 20.0 * throttle);
        }

        if let Some(battery) = &self.electric_air {
            battery.battery_voltage.set(12.6 - 0.001 * t);
            battery.current.set(15.0 + 5.0 * wave);
            battery.battery_temperature.set(25.0 + 2.0 * wave);
            battery.consumption.set(1.2 * t);
        }

        if let Some(gps) = &self.gps {
            gps.direction.set((t * 6.0) % 360.0);
            gps.speed.set(45.0 + 10.0 * wave);
            gps.latitude.set(48.6664 + 0.0005 * f64::from(wave));
            gps.longitude.set(9.4267 - 0.0005 * f64::from(wave));
            gps.altitude.set(420.0 + 20.0 * wave);
            gps.satellites.set(12.0);
        }
    }

    /// Spawn the task that refreshes the readings every `period`
    pub fn spawn(self, period: Duration) -> JoinHandle<()> {
        info!("Starting simulated sensors, update every {:?}", period);

        tokio::spawn(async move {
            let start = Instant::now();
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                self.update(start.elapsed().as_secs_f32());
            }
        })
    }
}
