//! ZeroMQ publisher implementation
//!
//! [`ZmqNotifier`] owns the publisher lifecycle: `initialize` binds the PUB
//! socket and attaches to the validation signals, `shutdown` detaches and
//! closes. A notifier that was never initialized, or whose transport failed
//! to open, stays disabled and ignores every notification.

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::framing::{emit_multipart, FrameSink, Topic};
use super::events::{BlockTipChanged, NotificationEvent, TransactionAccepted};
use super::observer::{self, Attachment};
use super::transport::{PubTransport, TransportError};
use super::PayloadFormat;
use crate::primitives::{display_hash, serialize};
use crate::storage::StorageError;
use crate::validation::ValidationSignals;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("ZMQ publisher is already initialized")]
    AlreadyInitialized,
}

/// Publish a transaction notification
///
/// Message format: [topic: "TXN", txid (32 bytes) | serialized transaction]
pub(crate) fn publish_transaction(
    sink: &dyn FrameSink,
    format: PayloadFormat,
    event: &TransactionAccepted<'_>,
) -> Result<usize, NotifierError> {
    let len = match format {
        PayloadFormat::IdentifierOnly => {
            emit_multipart(sink, Topic::Transaction, &event.txid)?;
            event.txid.len()
        }
        PayloadFormat::FullSerialization => {
            let tx_data = serialize(event.tx);
            emit_multipart(sink, Topic::Transaction, &tx_data)?;
            tx_data.len()
        }
    };
    Ok(len)
}

/// Publish a block tip notification
///
/// Message format: [topic: "BLK", block hash (32 bytes) | serialized block].
/// The full format reads the block from storage; a failed read sends nothing.
pub(crate) fn publish_block_tip(
    sink: &dyn FrameSink,
    format: PayloadFormat,
    event: &BlockTipChanged<'_>,
) -> Result<usize, NotifierError> {
    let len = match format {
        PayloadFormat::IdentifierOnly => {
            emit_multipart(sink, Topic::Block, &event.hash)?;
            event.hash.len()
        }
        PayloadFormat::FullSerialization => {
            let block = event.blocks.read_block(&event.hash)?;
            let block_data = serialize(&block);
            emit_multipart(sink, Topic::Block, &block_data)?;
            block_data.len()
        }
    };
    Ok(len)
}

/// Live publisher state: the frame sink and the payload format chosen at
/// initialization
pub(crate) struct NotifierCore<S: FrameSink> {
    sink: S,
    format: PayloadFormat,
}

impl<S: FrameSink> NotifierCore<S> {
    pub(crate) fn new(sink: S, format: PayloadFormat) -> Self {
        Self { sink, format }
    }

    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }

    pub(crate) fn into_sink(self) -> S {
        self.sink
    }

    pub(crate) fn dispatch(&self, event: NotificationEvent<'_>) {
        match event {
            NotificationEvent::TransactionAccepted(ref tx) => self.on_transaction(tx),
            NotificationEvent::BlockTipChanged(ref tip) => self.on_block_tip(tip),
        }
    }

    pub(crate) fn on_transaction(&self, event: &TransactionAccepted<'_>) {
        match publish_transaction(&self.sink, self.format, event) {
            Ok(len) => debug!(
                target: "zmq",
                "Published TXN notification for {}: {} bytes",
                display_hash(&event.txid),
                len
            ),
            Err(e) => report("TXN", &e),
        }
    }

    pub(crate) fn on_block_tip(&self, event: &BlockTipChanged<'_>) {
        match publish_block_tip(&self.sink, self.format, event) {
            Ok(len) => debug!(
                target: "zmq",
                "Published BLK notification for {}: {} bytes",
                display_hash(&event.hash),
                len
            ),
            Err(e) => report("BLK", &e),
        }
    }
}

/// Log a dropped notification
fn report(topic: &str, err: &NotifierError) {
    match err {
        NotifierError::Transport(e) => {
            error!(
                target: "zmq",
                errno = ?e.errno(),
                "Error: {} ({} notification dropped)",
                e,
                topic
            )
        }
        NotifierError::Storage(e) => {
            error!(target: "zmq", "Unable to read block for {} notification: {}", topic, e)
        }
        NotifierError::AlreadyInitialized => error!(target: "zmq", "{}", err),
    }
}

struct ActiveNotifier {
    core: Rc<NotifierCore<PubTransport>>,
    attachment: Attachment,
}

/// ZMQ block and transaction notifier
///
/// Lifecycle calls and notifications must come from the thread that owns
/// the validation signals.
pub struct ZmqNotifier {
    signals: Rc<ValidationSignals>,
    active: Option<ActiveNotifier>,
    transports_opened: usize,
}

impl ZmqNotifier {
    /// Create a disabled notifier for `signals`
    pub fn new(signals: Rc<ValidationSignals>) -> Self {
        Self {
            signals,
            active: None,
            transports_opened: 0,
        }
    }

    /// Bind the PUB socket and start publishing
    ///
    /// Failures are logged and leave the notifier disabled. Calling this
    /// while already initialized is a programming error: it is logged and
    /// the running publisher is left untouched.
    pub fn initialize(&mut self, endpoint: &str, format: PayloadFormat) {
        if self.active.is_some() {
            report("ZMQ", &NotifierError::AlreadyInitialized);
            return;
        }

        let transport = match PubTransport::open(endpoint) {
            Ok(transport) => transport,
            Err(e) => {
                error!(target: "zmq", errno = ?e.errno(), "Error: {}", e);
                warn!(target: "zmq", "ZMQ notifications disabled");
                return;
            }
        };
        self.transports_opened += 1;

        let core = Rc::new(NotifierCore::new(transport, format));
        let attachment = observer::attach(&self.signals, &core);
        self.active = Some(ActiveNotifier { core, attachment });
        info!(target: "zmq", "ZMQ notifications enabled ({} format) at {}", format, endpoint);
    }

    /// Detach from the validation signals and close the socket
    ///
    /// Queued messages are discarded. Safe to call when never initialized
    /// or already shut down.
    pub fn shutdown(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        observer::detach(&self.signals, active.attachment);

        match Rc::try_unwrap(active.core) {
            Ok(core) => core.into_sink().close(),
            Err(_) => {
                // Remaining handles close the transport when dropped.
                warn!(target: "zmq", "ZMQ publisher still referenced at shutdown");
            }
        }
        info!(target: "zmq", "ZMQ notifications stopped");
    }

    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Payload format of the running publisher
    pub fn format(&self) -> Option<PayloadFormat> {
        self.active.as_ref().map(|active| active.core.format)
    }

    /// Bound endpoint of the running publisher
    pub fn endpoint(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.core.sink().endpoint())
    }

    /// Number of transports this notifier has opened over its lifetime
    pub fn transports_opened(&self) -> usize {
        self.transports_opened
    }

    /// ZMQ context of the running publisher
    ///
    /// Embedding hook for in-process consumers: `inproc://` subscribers must
    /// create their sockets from the publisher's context.
    #[doc(hidden)]
    pub fn context(&self) -> Option<zmq::Context> {
        self.active.as_ref().and_then(|active| active.core.sink().context())
    }

    /// Publish a transaction accepted for relay (no-op when disabled)
    pub fn on_transaction(&self, event: &TransactionAccepted<'_>) {
        if let Some(ref active) = self.active {
            active.core.on_transaction(event);
        }
    }

    /// Publish a new chain tip (no-op when disabled)
    pub fn on_block_tip(&self, event: &BlockTipChanged<'_>) {
        if let Some(ref active) = self.active {
            active.core.on_block_tip(event);
        }
    }
}

impl Drop for ZmqNotifier {
    fn drop(&mut self) {
        self.shutdown();
    }
}
