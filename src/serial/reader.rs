//! Request framing on the receive side of the telemetry line.
//!
//! HoTT polls carry no length or delimiter; a poll ends when the line goes
//! quiet. Bytes that arrive back to back belong to one frame, and a gap of
//! at least the idle timeout closes it.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, trace};

/// Bytes kept per frame; anything beyond is dropped
pub const MAX_FRAME_LENGTH: usize = 64;

/// Splits the inbound byte stream into frames at idle gaps
pub struct RequestReader<R> {
    port: R,
    idle: Duration,
}

impl<R: AsyncRead + Unpin> RequestReader<R> {
    pub fn new(port: R, idle: Duration) -> Self {
        Self { port, idle }
    }

    /// Wait for the next frame
    ///
    /// Blocks until the first byte arrives, then collects bytes until the line
    /// has been idle for the configured time. Returns `Ok(None)` once the port
    /// reports end of stream.
    pub async fn next_frame(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut chunk = [0u8; MAX_FRAME_LENGTH];

        let n = self.port.read(&mut chunk).await?;
        if n == 0 {
            return Ok(None);
        }

        let mut frame = Vec::with_capacity(MAX_FRAME_LENGTH);
        frame.extend_from_slice(&chunk[..n]);

        loop {
            match timeout(self.idle, self.port.read(&mut chunk)).await {
                // idle gap: frame complete
                Err(_) => break,
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => {
                    let room = MAX_FRAME_LENGTH - frame.len();
                    frame.extend_from_slice(&chunk[..n.min(room)]);
                }
                Ok(Err(e)) => return Err(e),
            }
        }

        trace!("Frame received: {:02X?}", frame);
        Ok(Some(frame))
    }
}

/// Forward every frame to the dispatch loop
///
/// Returns when the port reaches end of stream or the dispatch loop has gone
/// away. Frames queue in the channel while a reply is being written.
pub async fn forward_requests<R: AsyncRead + Unpin>(
    mut reader: RequestReader<R>,
    tx: mpsc::Sender<Vec<u8>>,
) -> io::Result<()> {
    while let Some(frame) = reader.next_frame().await? {
        if tx.send(frame).await.is_err() {
            debug!("Dispatch loop stopped, request reader exiting");
            return Ok(());
        }
    }

    debug!("Serial port closed, request reader exiting");
    Ok(())
}
