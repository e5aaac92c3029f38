//! JSONL packet logger with size-based rotation.
//!
//! File I/O runs on a blocking writer task. The dispatch loop only hands
//! records to a [`PacketLog`] queue and never waits on the disk; when the
//! queue is full the record is dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::TelemetryConfig;
use crate::error::Result;
use crate::hott::protocol::Module;

const FILE_PREFIX: &str = "hott_";
const FILE_EXTENSION: &str = "jsonl";

/// Records buffered between the dispatch loop and the writer task
pub const PACKET_LOG_QUEUE_DEPTH: usize = 256;

/// One reply as written to the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketRecord {
    /// RFC 3339 UTC time the reply was sent
    pub timestamp: String,
    pub module: String,
    pub address: u8,
    pub length: usize,
    pub checksum: u8,
    /// Space-separated uppercase hex
    pub bytes: String,
}

impl PacketRecord {
    pub fn new(module: Module, packet: &[u8]) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            module: module.name().to_string(),
            address: module.address(),
            length: packet.len(),
            checksum: packet.last().copied().unwrap_or(0),
            bytes: to_hex(packet),
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Appends one JSON line per reply, rotating after `max_records_per_file`
/// records and keeping at most `max_files_to_keep` files
pub struct PacketLogger {
    dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    writer: Option<BufWriter<File>>,
    records_in_file: usize,
    sequence: u64,
}

impl std::fmt::Debug for PacketLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketLogger")
            .field("dir", &self.dir)
            .field("records_in_file", &self.records_in_file)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl PacketLogger {
    /// Create the log directory if needed; the first file opens on the first record
    pub fn new(config: &TelemetryConfig) -> Result<Self> {
        let dir = PathBuf::from(&config.log_dir);
        fs::create_dir_all(&dir)?;
        info!("Packet log directory: {}", dir.display());

        Ok(Self {
            dir,
            max_records_per_file: config.max_records_per_file,
            max_files_to_keep: config.max_files_to_keep,
            writer: None,
            records_in_file: 0,
            sequence: 0,
        })
    }

    /// Record one reply
    pub fn log(&mut self, module: Module, packet: &[u8]) -> Result<()> {
        self.write(&PacketRecord::new(module, packet))
    }

    /// Append one record, rotating first if the current file is full
    ///
    /// Lines are buffered; they reach the disk on rotation, on [`flush`](Self::flush)
    /// and when the logger is dropped.
    pub fn write(&mut self, record: &PacketRecord) -> Result<()> {
        if self.writer.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        let line = serde_json::to_string(record)?;
        if let Some(writer) = self.writer.as_mut() {
            writeln!(writer, "{}", line)?;
        }
        self.records_in_file += 1;
        Ok(())
    }

    /// Flush the current file
    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        self.flush()?;

        let name = format!(
            "{}{}_{:06}.{}",
            FILE_PREFIX,
            Utc::now().format("%Y%m%d_%H%M%S"),
            self.sequence,
            FILE_EXTENSION
        );
        let path = self.dir.join(name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!("Opened packet log {}", path.display());

        self.writer = Some(BufWriter::new(file));
        self.records_in_file = 0;
        self.sequence += 1;

        self.prune()
    }

    /// Delete the oldest log files beyond `max_files_to_keep`
    fn prune(&self) -> Result<()> {
        let mut files = log_files(&self.dir)?;
        if files.len() <= self.max_files_to_keep {
            return Ok(());
        }

        files.sort();
        let excess = files.len() - self.max_files_to_keep;
        for path in files.into_iter().take(excess) {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Removed old packet log {}", path.display()),
                Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
        Ok(())
    }
}

/// Non-blocking handle the dispatch loop records replies through
#[derive(Debug)]
pub struct PacketLog {
    tx: mpsc::Sender<PacketRecord>,
    dropped: u64,
}

impl PacketLog {
    /// Create a handle and the receiving end of its queue
    pub fn channel(depth: usize) -> (Self, mpsc::Receiver<PacketRecord>) {
        let (tx, rx) = mpsc::channel(depth);
        (Self { tx, dropped: 0 }, rx)
    }

    /// Queue one reply for the writer without waiting
    ///
    /// # Returns
    ///
    /// * `true` - Record queued
    /// * `false` - Queue full or writer gone; the record is dropped
    pub fn record(&mut self, module: Module, packet: &[u8]) -> bool {
        match self.tx.try_send(PacketRecord::new(module, packet)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                debug!("Packet log queue full, record dropped ({} so far)", self.dropped);
                false
            }
            Err(TrySendError::Closed(_)) => {
                self.dropped += 1;
                false
            }
        }
    }

    /// Records dropped because the writer could not keep up
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Move `logger` onto a blocking writer task fed by a [`PacketLog`]
///
/// The task drains the queue until every `PacketLog` handle is dropped, then
/// flushes the current file and exits.
///
/// # Arguments
///
/// * `logger` - Logger owning the log directory and rotation state
/// * `depth` - Queue capacity between the dispatch loop and the writer
///
/// # Returns
///
/// * `(PacketLog, JoinHandle<()>)` - Handle for the dispatch loop, and the
///   writer task to await on shutdown
pub fn spawn_packet_log(mut logger: PacketLogger, depth: usize) -> (PacketLog, JoinHandle<()>) {
    let (log, mut rx) = PacketLog::channel(depth);

    let writer = tokio::task::spawn_blocking(move || {
        while let Some(record) = rx.blocking_recv() {
            if let Err(e) = logger.write(&record) {
                warn!("Packet log write failed: {}", e);
            }
        }
        if let Err(e) = logger.flush() {
            warn!("Failed to flush packet log: {}", e);
        }
        debug!("Packet log writer stopped");
    });

    (log, writer)
}

/// Packet log files in `dir`, unsorted
pub fn log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(FILE_PREFIX))
            && path.extension().is_some_and(|ext| ext == FILE_EXTENSION);
        if is_log {
            files.push(path);
        }
    }
    Ok(files)
}
