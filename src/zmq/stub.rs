//! Notifier used when ZMQ support is compiled out
//!
//! Build with `--no-default-features` to drop the libzmq dependency. The host
//! keeps making the same lifecycle calls; they all do nothing.

use std::rc::Rc;

use tracing::warn;

use super::events::{BlockTipChanged, TransactionAccepted};
use super::PayloadFormat;
use crate::validation::ValidationSignals;

/// Permanently disabled ZMQ notifier
pub struct ZmqNotifier {
    _signals: Rc<ValidationSignals>,
}

impl ZmqNotifier {
    pub fn new(signals: Rc<ValidationSignals>) -> Self {
        Self { _signals: signals }
    }

    /// Logs that ZMQ support is unavailable; the notifier stays disabled
    pub fn initialize(&mut self, endpoint: &str, _format: PayloadFormat) {
        warn!(target: "zmq", "ZMQ support not compiled in, ignoring endpoint {}", endpoint);
    }

    pub fn shutdown(&mut self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn format(&self) -> Option<PayloadFormat> {
        None
    }

    pub fn endpoint(&self) -> Option<&str> {
        None
    }

    pub fn transports_opened(&self) -> usize {
        0
    }

    pub fn on_transaction(&self, _event: &TransactionAccepted<'_>) {}

    pub fn on_block_tip(&self, _event: &BlockTipChanged<'_>) {}
}
