//! Reply activity signal (the "blink" after each packet sent).

use tracing::{debug, info};

use super::protocol::Module;

/// Replies between periodic status messages
const LOG_INTERVAL_REPLIES: u64 = 1000;

/// Notified once for every reply packet the responder emits
#[cfg_attr(test, mockall::automock)]
pub trait ActivityIndicator: Send {
    fn reply_sent(&mut self, module: Module);
}

/// Ignores activity
#[derive(Debug, Default, Clone, Copy)]
pub struct NoActivity;

impl ActivityIndicator for NoActivity {
    fn reply_sent(&mut self, _module: Module) {}
}

/// Reports activity through the log: the first reply per module and a
/// running count every [`LOG_INTERVAL_REPLIES`] replies
#[derive(Debug, Default, Clone)]
pub struct LogActivity {
    replies: u64,
    seen: [bool; 4],
}

impl LogActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total replies signalled so far
    pub fn replies(&self) -> u64 {
        self.replies
    }
}

impl ActivityIndicator for LogActivity {
    fn reply_sent(&mut self, module: Module) {
        self.replies += 1;

        if !self.seen[module.index()] {
            self.seen[module.index()] = true;
            info!("First {} reply sent", module);
        } else {
            debug!("{} reply sent", module);
        }

        if self.replies % LOG_INTERVAL_REPLIES == 0 {
            info!("Sent {} replies", self.replies);
        }
    }
}
