//! # HoTT Responder
//!
//! Emulates Graupner HoTT telemetry sensor modules on the receiver's
//! telemetry line.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Load configuration (first argument, or `config/default.toml`)
//!    - Set up logging to stderr and optionally a daily log file
//!    - Assemble the sensor registry for the configured modules
//!    - Start the simulated producers (if enabled) and the climb-rate sampler
//!    - Open the serial port
//!
//! 2. **Main Loop**
//!    - The reader task frames polls by line idle time and queues them
//!    - The dispatch task answers each poll for an enabled module
//!
//! 3. **Graceful Shutdown**
//!    - Ctrl+C or loss of the serial port stops the reader
//!    - The dispatch loop drains the queue and reports its counters
//!    - The packet log writer flushes its last file
//!
//! # Examples
//!
//! ```bash
//! cargo run --release -- config/default.toml
//! ```
//!
//! Expected output:
//! ```text
//! INFO hott_responder: HoTT Responder v0.1.0 starting...
//! INFO hott_responder::serial: Opened HoTT telemetry port /dev/ttyUSB0 at 19200 baud
//! INFO hott_responder::hott::dispatch: Dispatch loop started, answering for: [Vario]
//! INFO hott_responder::hott::activity: First vario reply sent
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hott_responder::config::{Config, LoggingConfig};
use hott_responder::hott::activity::LogActivity;
use hott_responder::hott::climb::{spawn_climb_sampler, ClimbRates};
use hott_responder::hott::dispatch::REQUEST_QUEUE_DEPTH;
use hott_responder::hott::{Dispatcher, Responder};
use hott_responder::sensors::simulated::build_registry;
use hott_responder::serial::{forward_requests, HottSerial, RequestReader};
use hott_responder::telemetry::{spawn_packet_log, PacketLogger, PACKET_LOG_QUEUE_DEPTH};

/// Configuration file used when no path is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// File name prefix for the daily application log
const LOG_FILE_NAME: &str = "hott-responder.log";

/// Set up stderr logging plus an optional daily file
///
/// `RUST_LOG` overrides the configured level. The returned guard must live
/// until exit so buffered file output is flushed.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = if config.directory.is_empty() {
        (None, None)
    } else {
        let appender = tracing_appender::rolling::daily(&config.directory, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    let _log_guard = init_logging(&config.logging);

    info!("HoTT Responder v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from {}", config_path);

    // Sensor registry and producers
    let (registry, simulated) = build_registry(&config.sensors);
    info!("Emulating modules: {:?}", registry.enabled_modules());

    let simulation = if config.simulation.enabled {
        let period = Duration::from_millis(config.simulation.update_interval_ms);
        Some(simulated.spawn(period))
    } else {
        info!("Simulation disabled, sensor readings stay at their initial values");
        None
    };

    let climb = Arc::new(ClimbRates::new());
    let climb_jobs = spawn_climb_sampler(registry.vario().altitude.clone(), Arc::clone(&climb));

    // Serial link
    let serial = HottSerial::open(&config.serial).context("Failed to open HoTT serial port")?;
    info!("Listening for HoTT polls on {}", serial.device_path());
    let (read_half, write_port) = serial.split();

    let (tx, rx) = mpsc::channel(REQUEST_QUEUE_DEPTH);
    let reader = RequestReader::new(read_half, config.serial.idle_timeout());
    let mut reader_task = tokio::spawn(forward_requests(reader, tx));

    let responder = Responder::new(registry, climb, LogActivity::new());
    let mut dispatcher = Dispatcher::new(responder, write_port);
    let mut packet_log_writer = None;
    if config.telemetry.enabled {
        let logger =
            PacketLogger::new(&config.telemetry).context("Failed to initialize packet log")?;
        let (packet_log, writer) = spawn_packet_log(logger, PACKET_LOG_QUEUE_DEPTH);
        dispatcher = dispatcher.with_packet_log(packet_log);
        packet_log_writer = Some(writer);
    }
    let dispatch_task = tokio::spawn(dispatcher.run(rx));

    info!("Press Ctrl+C to exit");

    tokio::select! {
        result = &mut reader_task => match result {
            Ok(Ok(())) => info!("Serial port closed"),
            Ok(Err(e)) => error!("Serial read failed: {}", e),
            Err(e) => error!("Request reader task failed: {}", e),
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    // Dropping the reader closes the request channel and ends the dispatch loop
    reader_task.abort();
    let stats = dispatch_task.await.context("Dispatch task failed")?;
    info!("Total replies sent: {}", stats.replies);

    if let Some(writer) = packet_log_writer {
        writer.await.context("Packet log writer failed")?;
    }

    for job in climb_jobs {
        job.abort();
    }
    if let Some(simulation) = simulation {
        simulation.abort();
    }

    Ok(())
}
