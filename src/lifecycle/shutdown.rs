//! Shutdown coordination for the gateway.
//!
//! The flag is latched: a listener that subscribes after `trigger` still sees
//! the shutdown instead of waiting forever.

use std::sync::Arc;

use tokio::sync::watch;

/// Owner side of the shutdown flag. Cheap to clone into signal handlers.
#[derive(Debug, Clone)]
pub struct Shutdown {
    flag: Arc<watch::Sender<bool>>,
}

/// Listener side, handed to the server.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    flag: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self {
            flag: Arc::new(flag),
        }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            flag: self.flag.subscribe(),
        }
    }

    /// Raise the flag. Idempotent, and works with no listeners.
    pub fn trigger(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.flag.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered, or when every `Shutdown` handle is
    /// gone.
    pub async fn recv(mut self) {
        let _ = self.flag.wait_for(|triggered| *triggered).await;
    }
}
