//! # Telemetry Module
//!
//! Optional record of every reply sent to the receiver.
//!
//! This module handles:
//! - Formatting replies as JSONL (JSON Lines)
//! - Writing to rotating log files (max N records per file)
//! - Retaining only the last M files
//! - Keeping file I/O off the dispatch task

pub mod logger;

pub use logger::{
    spawn_packet_log, PacketLog, PacketLogger, PacketRecord, PACKET_LOG_QUEUE_DEPTH,
};
