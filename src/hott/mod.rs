//! # HoTT Protocol Module
//!
//! Graupner HoTT telemetry sensor emulation.
//!
//! This module handles:
//! - Request classification and parsing
//! - Reply packet layouts and checksums
//! - Per-module encoders with session extrema
//! - Climb-rate sampling for the vario
//! - The single-consumer dispatch loop

pub mod activity;
pub mod checksum;
pub mod climb;
pub mod dispatch;
pub mod encoder;
pub mod extrema;
pub mod listener;
pub mod packet;
pub mod protocol;

pub use dispatch::Dispatcher;
pub use listener::Responder;
pub use protocol::Module;
