//! Process shutdown signalling.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::signal;
use tokio::sync::Notify;
use tracing::{info, warn};

/// Shutdown flag that can also be awaited.
#[derive(Debug, Default)]
pub struct Shutdown {
    flag: AtomicBool, // Polled between units of work
    notify: Notify,   // Wakes tasks waiting in `triggered`
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// The raw flag, for loops that check it between items.
    pub fn flag(&self) -> &AtomicBool {
        &self.flag
    }

    /// Resolve once shutdown has been triggered.
    pub async fn triggered(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_triggered() {
                return;
            }
            notified.await;
        }
    }

    /// Run `fut` to completion unless shutdown is triggered first.
    pub async fn run_until<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            output = fut => Some(output),
            _ = self.triggered() => None,
        }
    }
}

/// Wait for Ctrl+C or SIGTERM and trigger `shutdown`.
pub async fn wait_for_signal(shutdown: Arc<Shutdown>) {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("🛑 Received Ctrl+C, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                    }
                    Err(e) => {
                        warn!("Failed to register SIGTERM handler: {}", e);
                        std::future::pending::<()>().await;
                    }
                }
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("🛑 Received SIGTERM, shutting down...");
        }
    }

    shutdown.trigger();
}
