//! Notification events
//!
//! Built by the observer adapter for each announcement and handed to the
//! publisher by reference. Events borrow from the announcing call and are
//! never stored.

use crate::primitives::{Hash, Transaction};
use crate::storage::BlockLookup;

/// A transaction accepted for relay
#[derive(Clone, Copy)]
pub struct TransactionAccepted<'a> {
    pub txid: Hash,
    pub tx: &'a Transaction,
}

/// The best-chain tip moved to `hash`
#[derive(Clone, Copy)]
pub struct BlockTipChanged<'a> {
    pub hash: Hash,
    pub blocks: &'a dyn BlockLookup,
}

/// Event handed to the publisher; built per announcement and never stored
#[derive(Clone, Copy)]
pub enum NotificationEvent<'a> {
    TransactionAccepted(TransactionAccepted<'a>),
    BlockTipChanged(BlockTipChanged<'a>),
}
