//! # HoTT Responder Library
//!
//! Telemetry responder for Graupner HoTT receivers.
//!
//! The receiver polls the telemetry bus with a short request naming a sensor
//! module; this library answers with a fixed 45-byte packet built from the
//! live sensor readings published into a [`sensors::SensorRegistry`].

pub mod config;
pub mod error;
pub mod hott;
pub mod sensors;
pub mod serial;
pub mod telemetry;
