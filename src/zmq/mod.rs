//! ZeroMQ notification publisher
//!
//! Publishes blockchain events on a single ZMQ PUB endpoint as two-frame
//! messages: a 3-byte topic (`TXN` or `BLK`) followed by the payload.
//!
//! Payloads are either the 32-byte identifier ([`PayloadFormat::IdentifierOnly`])
//! or the entity in network wire format ([`PayloadFormat::FullSerialization`]).
//! Delivery is best-effort: transport and storage failures are logged and the
//! notification is dropped, never surfaced to the validation pipeline.
//!
//! Without the `zmq` feature, [`ZmqNotifier`] is a stub whose calls do nothing.

pub mod config;
pub mod events;

#[cfg(feature = "zmq")]
pub mod framing;
#[cfg(feature = "zmq")]
pub mod observer;
#[cfg(feature = "zmq")]
pub mod publisher;
#[cfg(feature = "zmq")]
pub mod transport;

#[cfg(not(feature = "zmq"))]
mod stub;

pub use config::{ConfigError, PayloadFormat, ZmqConfig};
pub use events::{BlockTipChanged, NotificationEvent, TransactionAccepted};

#[cfg(feature = "zmq")]
pub use framing::{emit_multipart, send_frames, FrameSink, Topic};
#[cfg(feature = "zmq")]
pub use publisher::{NotifierError, ZmqNotifier};
#[cfg(feature = "zmq")]
pub use transport::{PubTransport, TransportError};

#[cfg(not(feature = "zmq"))]
pub use stub::ZmqNotifier;
