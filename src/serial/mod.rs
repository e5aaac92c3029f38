//! # Serial Communication Module
//!
//! Owns the half-duplex HoTT telemetry line.
//!
//! This module handles:
//! - Opening the serial port at 19,200 baud 8N1
//! - Auto-detecting the device from common UART paths
//! - Splitting the stream into a request reader and a reply writer
//! - Framing inbound polls by line idle time

pub mod port_trait;
pub mod reader;

pub use port_trait::{SerialPortIO, TokioSerialPort};
pub use reader::{forward_requests, RequestReader};

use crate::config::SerialConfig;
use crate::error::{HottError, Result};
use tokio::io::ReadHalf;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info, warn};

/// Port setting that triggers auto-detection
pub const AUTO_DETECT_PORT: &str = "auto";

/// Device paths to try when auto-detecting (in order of preference)
const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyUSB0", // USB-to-serial adapters
    "/dev/ttyAMA0", // Raspberry Pi PL011 UART
    "/dev/serial0", // Raspberry Pi primary UART alias
];

/// HoTT telemetry serial port
pub struct HottSerial {
    port: SerialStream,
    device_path: String,
}

impl std::fmt::Debug for HottSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HottSerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl HottSerial {
    /// Open the port named in `config`, auto-detecting when it is `"auto"`
    ///
    /// # Errors
    ///
    /// Returns [`HottError::SerialPortNotFound`] if no candidate device opens.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hott_responder::config::SerialConfig;
    /// use hott_responder::serial::HottSerial;
    ///
    /// let serial = HottSerial::open(&SerialConfig::default())?;
    /// println!("Listening on {}", serial.device_path());
    /// # Ok::<(), hott_responder::error::HottError>(())
    /// ```
    pub fn open(config: &SerialConfig) -> Result<Self> {
        if config.port == AUTO_DETECT_PORT {
            Self::open_with_paths(DEFAULT_DEVICE_PATHS, config.baud_rate)
        } else {
            Self::open_with_paths(&[config.port.as_str()], config.baud_rate)
        }
    }

    /// Open the first of `paths` that succeeds
    ///
    /// # Arguments
    ///
    /// * `paths` - Candidate device paths, tried in order
    /// * `baud_rate` - Line speed (19200 for HoTT)
    ///
    /// # Returns
    ///
    /// * `HottSerial` - The opened port and the path it was found at
    ///
    /// # Errors
    ///
    /// Returns [`HottError::SerialPortNotFound`] listing `paths` if none opens.
    pub fn open_with_paths(paths: &[&str], baud_rate: u32) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, baud_rate) {
                Ok(port) => {
                    info!("Opened HoTT telemetry port {} at {} baud", path, baud_rate);
                    return Ok(Self {
                        port,
                        device_path: path.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(HottError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open a specific serial port with 8N1 settings and no flow control
    fn open_port(path: &str, baud_rate: u32) -> Result<SerialStream> {
        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| HottError::Serial(format!("Failed to open {}: {}", path, e)))?;

        Ok(port)
    }

    /// Path of the device that was opened
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Split into the read half for polls and the reply writer
    pub fn split(self) -> (ReadHalf<SerialStream>, TokioSerialPort) {
        let (read, write) = tokio::io::split(self.port);
        (read, TokioSerialPort::new(write))
    }
}
