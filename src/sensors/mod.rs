//! # Sensor Module
//!
//! Live sensor readings shared between producers and the HoTT encoders.
//!
//! This module handles:
//! - Lock-free single-writer slots for scalar readings
//! - The per-module registry the encoders read from
//! - Synthetic producers for bench testing

pub mod registry;
pub mod simulated;
pub mod slot;

pub use registry::SensorRegistry;
