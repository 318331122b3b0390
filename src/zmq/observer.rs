//! Validation observer adapter
//!
//! Connects a publisher to [`ValidationSignals`] without the pipeline knowing
//! about the transport. Each `attach` must be paired with one `detach`.

use std::rc::Rc;

use tracing::debug;

use super::events::{BlockTipChanged, NotificationEvent, TransactionAccepted};
use super::framing::FrameSink;
use super::publisher::NotifierCore;
use crate::primitives::{Hash, Transaction};
use crate::storage::BlockLookup;
use crate::validation::{HandlerId, ValidationSignals};

/// Handler registrations made by [`attach`]
#[derive(Debug)]
#[must_use = "an attachment must be passed to detach"]
pub struct Attachment {
    relay_tx: HandlerId,
    block_tip: HandlerId,
}

/// Register the publisher for relay-tx and block-tip announcements
pub(crate) fn attach<S: FrameSink + 'static>(
    signals: &ValidationSignals,
    core: &Rc<NotifierCore<S>>,
) -> Attachment {
    let tx_core = Rc::clone(core);
    let relay_tx = signals.connect_relay_tx(move |txid: &Hash, tx: &Transaction| {
        tx_core.dispatch(NotificationEvent::TransactionAccepted(TransactionAccepted {
            txid: *txid,
            tx,
        }));
    });

    let tip_core = Rc::clone(core);
    let block_tip = signals.connect_block_tip(move |hash: &Hash, blocks: &dyn BlockLookup| {
        tip_core.dispatch(NotificationEvent::BlockTipChanged(BlockTipChanged {
            hash: *hash,
            blocks,
        }));
    });

    debug!(target: "zmq", "Attached to validation signals");
    Attachment {
        relay_tx,
        block_tip,
    }
}

/// Remove both registrations made by [`attach`]
pub(crate) fn detach(signals: &ValidationSignals, attachment: Attachment) {
    signals.disconnect(attachment.relay_tx);
    signals.disconnect(attachment.block_tip);
    debug!(target: "zmq", "Detached from validation signals");
}
