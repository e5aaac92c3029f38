//! # Dispatch Loop
//!
//! Single consumer of the request channel. Each received frame is handled to
//! completion (encode, write, flush) before the next one is taken, so replies
//! never interleave on the half-duplex line. Frames that arrive meanwhile wait
//! in the channel.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::activity::ActivityIndicator;
use super::listener::Responder;
use super::protocol::Module;
use crate::serial::SerialPortIO;
use crate::telemetry::PacketLog;

/// Depth of the request channel between the reader and the dispatcher
pub const REQUEST_QUEUE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Idle, blocked on the request channel
    Waiting,
    /// Building and writing a reply
    Handling,
}

/// Counters reported when the loop exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub requests: u64,
    pub replies: u64,
    pub write_errors: u64,
}

pub struct Dispatcher<A: ActivityIndicator, W: SerialPortIO> {
    responder: Responder<A>,
    port: W,
    packet_log: Option<PacketLog>,
    state: DispatchState,
    stats: DispatchStats,
}

impl<A: ActivityIndicator, W: SerialPortIO> Dispatcher<A, W> {
    pub fn new(responder: Responder<A>, port: W) -> Self {
        Self {
            responder,
            port,
            packet_log: None,
            state: DispatchState::Waiting,
            stats: DispatchStats::default(),
        }
    }

    /// Queue every reply written to the packet log
    ///
    /// The log is written by its own task; a full queue drops records rather
    /// than delaying the next reply.
    pub fn with_packet_log(mut self, packet_log: PacketLog) -> Self {
        self.packet_log = Some(packet_log);
        self
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Handle one frame; returns `true` if a reply went out
    pub async fn handle_one(&mut self, frame: &[u8]) -> bool {
        self.state = DispatchState::Handling;
        self.stats.requests += 1;

        let sent = match self.responder.handle(frame) {
            Some(reply) => self.send(&reply).await,
            None => false,
        };

        self.state = DispatchState::Waiting;
        sent
    }

    async fn send(&mut self, reply: &[u8]) -> bool {
        if let Err(e) = self.port.write_all(reply).await {
            warn!("Failed to write reply: {}", e);
            self.stats.write_errors += 1;
            return false;
        }
        if let Err(e) = self.port.flush().await {
            warn!("Failed to flush serial port: {}", e);
            self.stats.write_errors += 1;
            return false;
        }

        self.stats.replies += 1;

        if let Some(packet_log) = self.packet_log.as_mut() {
            if let Some(module) = reply.get(1).copied().and_then(Module::from_address) {
                packet_log.record(module, reply);
            }
        }
        true
    }

    /// Serve requests until the channel closes
    pub async fn run(mut self, mut requests: mpsc::Receiver<Vec<u8>>) -> DispatchStats {
        info!(
            "Dispatch loop started, answering for: {:?}",
            self.responder.registry().enabled_modules()
        );

        while let Some(frame) = requests.recv().await {
            self.handle_one(&frame).await;
        }

        if let Some(packet_log) = self.packet_log.as_ref() {
            if packet_log.dropped() > 0 {
                warn!("Packet log dropped {} records", packet_log.dropped());
            }
        }

        debug!("Request channel closed");
        info!(
            "Dispatch loop stopped: {} requests, {} replies, {} write errors",
            self.stats.requests, self.stats.replies, self.stats.write_errors
        );
        self.stats
    }
}
