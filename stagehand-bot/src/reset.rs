//! One-shot reset timers
//!
//! Each mutable field has at most one armed revert timer. Arming always
//! supersedes the previously armed timer for that field. A firing timer
//! does not mutate anything itself; it enqueues the field on the main
//! loop's channel so the revert runs serialized with chat events.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::settings::Field;

/// Per-field one-shot timer bookkeeping
///
/// A field is Armed while it has an entry in the cancel map and Idle
/// otherwise. Firing and cancellation both return it to Idle.
pub struct ResetScheduler {
    /// Where fired timers enqueue their field
    tx: mpsc::UnboundedSender<Field>,
    /// Cancellation handles for armed timers
    armed: HashMap<Field, oneshot::Sender<()>>,
}

impl ResetScheduler {
    pub fn new(tx: mpsc::UnboundedSender<Field>) -> Self {
        Self {
            tx,
            armed: HashMap::new(),
        }
    }

    /// Arm the reset timer for a field, superseding any armed one
    pub fn arm(&mut self, field: Field, delay: Duration) {
        self.disarm(field);

        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.armed.insert(field, cancel_tx);

        let tx = self.tx.clone();
        tokio::spawn(async move {
            // Biased so a cancellation that raced the deadline still wins
            tokio::select! {
                biased;
                _ = cancel_rx => {}
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone means the bot is shutting down
                    let _ = tx.send(field);
                }
            }
        });

        debug!(
            field = field.label(),
            delay_secs = delay.as_secs(),
            "reset timer armed"
        );
    }

    /// Cancel the armed timer for a field
    ///
    /// Returns true if a timer was armed.
    pub fn disarm(&mut self, field: Field) -> bool {
        match self.armed.remove(&field) {
            Some(cancel_tx) => {
                let _ = cancel_tx.send(());
                debug!(field = field.label(), "reset timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Drop the bookkeeping for a timer that has fired
    pub fn clear(&mut self, field: Field) {
        self.armed.remove(&field);
    }

    /// Whether a field currently has an armed timer
    pub fn is_armed(&self, field: Field) -> bool {
        self.armed.contains_key(&field)
    }
}
