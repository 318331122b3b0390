//! BLVM ZMQ notifications
//!
//! Broadcasts new relayed transactions and new chain tips to external
//! subscribers over a ZeroMQ PUB socket.
//!
//! ## Wire Protocol
//!
//! Every notification is a two-frame message:
//!
//! | Frame | Content | Size |
//! |---|---|---|
//! | 0 | `TXN` or `BLK` | 3 bytes |
//! | 1 | txid / block hash, or the serialized entity | 32 bytes or variable |
//!
//! Delivery is at-most-once with no sequence numbers or replay.
//!
//! ## Usage
//!
//! ```no_run
//! use std::rc::Rc;
//! use blvm_zmq::validation::ValidationSignals;
//! use blvm_zmq::zmq::{PayloadFormat, ZmqNotifier};
//!
//! let signals = Rc::new(ValidationSignals::new());
//! let mut notifier = ZmqNotifier::new(Rc::clone(&signals));
//! notifier.initialize("tcp://127.0.0.1:28332", PayloadFormat::FullSerialization);
//! // ... validation announces events through `signals` ...
//! notifier.shutdown();
//! ```

pub mod config;
pub mod primitives;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod zmq;

pub use config::{LoggingConfig, NotifyConfig};
pub use primitives::{Block, BlockHeader, Hash, OutPoint, Transaction, TxIn, TxOut};
pub use storage::{BlockLookup, MemoryBlockStore, StorageError};
pub use validation::ValidationSignals;
pub use crate::zmq::{PayloadFormat, ZmqConfig, ZmqNotifier};
