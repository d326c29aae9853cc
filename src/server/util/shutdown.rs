//! Cooperative shutdown signal.
//!
//! A `tokio::sync::watch` channel carrying `true` once shutdown is requested. The
//! scheduler owns the sending side; services receive a `Shutdown` and check it between
//! units of work.

use tokio::sync::watch;

/// Receiving side of the shutdown signal.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Creates a linked sender and receiver.
    ///
    /// Send `true` on the returned sender to request shutdown.
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self { rx })
    }

    /// A signal that is never triggered, for one-off runs.
    pub fn never() -> Self {
        let (_tx, shutdown) = Self::channel();
        shutdown
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes once shutdown is requested.
    ///
    /// If the sender is dropped without requesting shutdown this never completes.
    pub async fn triggered(&mut self) {
        if self.rx.wait_for(|requested| *requested).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
