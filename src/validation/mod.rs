//! Validation notification signals
//!
//! The validation pipeline announces two events to registered handlers:
//! a transaction accepted for relay, and a new best-chain tip. Handlers are
//! plain closures kept in a table and invoked in registration order on the
//! announcing thread.
//!
//! Handlers may connect or disconnect handlers from inside a callback. Each
//! announcement runs over the handlers registered when it started, skipping
//! any that were disconnected before their turn.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

use crate::primitives::{display_hash, txid, Hash, Transaction};
use crate::storage::BlockLookup;

/// Handle returned by `connect_*`, used to disconnect a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

/// Handler for "transaction accepted for relay": (txid, transaction)
pub type RelayTxHandler = Rc<dyn Fn(&Hash, &Transaction)>;

/// Handler for "chain tip updated": (block hash, block lookup)
pub type BlockTipHandler = Rc<dyn Fn(&Hash, &dyn BlockLookup)>;

type HandlerTable<H> = RefCell<Vec<(HandlerId, H)>>;

/// Notification signal table owned by the validation pipeline
#[derive(Default)]
pub struct ValidationSignals {
    next_id: Cell<u64>,
    relay_tx: HandlerTable<RelayTxHandler>,
    block_tip: HandlerTable<BlockTipHandler>,
}

fn snapshot<H: Clone>(table: &HandlerTable<H>) -> Vec<(HandlerId, H)> {
    table.borrow().clone()
}

fn is_connected<H>(table: &HandlerTable<H>, id: HandlerId) -> bool {
    table.borrow().iter().any(|(handler_id, _)| *handler_id == id)
}

impl ValidationSignals {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self) -> HandlerId {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        HandlerId(id)
    }

    /// Register a handler for transactions accepted for relay
    pub fn connect_relay_tx<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&Hash, &Transaction) + 'static,
    {
        let id = self.allocate_id();
        let handler: RelayTxHandler = Rc::new(handler);
        self.relay_tx.borrow_mut().push((id, handler));
        id
    }

    /// Register a handler for chain tip updates
    pub fn connect_block_tip<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&Hash, &dyn BlockLookup) + 'static,
    {
        let id = self.allocate_id();
        let handler: BlockTipHandler = Rc::new(handler);
        self.block_tip.borrow_mut().push((id, handler));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let mut removed = false;
        self.relay_tx.borrow_mut().retain(|(handler_id, _)| {
            let keep = *handler_id != id;
            removed |= !keep;
            keep
        });
        self.block_tip.borrow_mut().retain(|(handler_id, _)| {
            let keep = *handler_id != id;
            removed |= !keep;
            keep
        });
        removed
    }

    /// Announce a transaction that passed relay checks
    pub fn transaction_accepted(&self, tx: &Transaction) {
        let txid = txid(tx);
        trace!("NotifyRelayTx {}", display_hash(&txid));
        for (id, handler) in snapshot(&self.relay_tx) {
            if is_connected(&self.relay_tx, id) {
                handler(&txid, tx);
            }
        }
    }

    /// Announce a new best-chain tip
    pub fn block_tip_changed(&self, hash: Hash, blocks: &dyn BlockLookup) {
        trace!("NotifyBlockTip {}", display_hash(&hash));
        for (id, handler) in snapshot(&self.block_tip) {
            if is_connected(&self.block_tip, id) {
                handler(&hash, blocks);
            }
        }
    }

    pub fn relay_tx_handlers(&self) -> usize {
        self.relay_tx.borrow().len()
    }

    pub fn block_tip_handlers(&self) -> usize {
        self.block_tip.borrow().len()
    }
}
