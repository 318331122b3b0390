//! PUB socket ownership
//!
//! [`PubTransport`] owns the ZMQ context and the bound PUB socket. Both are
//! released together: on [`PubTransport::close`], on drop, or when `open`
//! fails part way.

use thiserror::Error;
use tracing::{debug, error};
use zmq::{Context as ZmqContext, Socket, PUB};

use super::framing::FrameSink;

/// I/O threads in the publisher's context
const IO_THREADS: i32 = 1;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Unable to initialize ZMQ context: {0}")]
    Context(#[source] zmq::Error),
    #[error("Unable to open ZMQ pub socket: {0}")]
    Socket(#[source] zmq::Error),
    #[error("Unable to bind ZMQ socket to {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: zmq::Error,
    },
    #[error("Unable to set ZMQ socket option {option}: {source}")]
    SetOption {
        option: &'static str,
        #[source]
        source: zmq::Error,
    },
    #[error("Unable to send ZMQ msg: {0}")]
    Send(#[source] zmq::Error),
    #[error("ZMQ socket is not bound")]
    NotBound,
}

impl TransportError {
    /// Raw errno reported by libzmq, if this error came from it
    pub fn errno(&self) -> Option<i32> {
        match self {
            TransportError::Context(e)
            | TransportError::Socket(e)
            | TransportError::Bind { source: e, .. }
            | TransportError::SetOption { source: e, .. }
            | TransportError::Send(e) => Some(e.to_raw()),
            TransportError::NotBound => None,
        }
    }
}

/// Bound ZMQ PUB socket and its context
pub struct PubTransport {
    // Declared before `context` so a partially built transport drops the
    // socket first.
    socket: Option<Socket>,
    context: Option<ZmqContext>,
    endpoint: String,
}

impl PubTransport {
    /// Create a context and a PUB socket bound to `endpoint`
    pub fn open(endpoint: &str) -> Result<Self, TransportError> {
        let context = ZmqContext::new();
        context
            .set_io_threads(IO_THREADS)
            .map_err(TransportError::Context)?;

        let socket = context.socket(PUB).map_err(TransportError::Socket)?;
        socket
            .bind(endpoint)
            .map_err(|source| TransportError::Bind {
                endpoint: endpoint.to_string(),
                source,
            })?;

        debug!(target: "zmq", "PUB socket bound to {}", endpoint);
        Ok(Self {
            socket: Some(socket),
            context: Some(context),
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_bound(&self) -> bool {
        self.socket.is_some()
    }

    /// Context handle, for `inproc://` subscribers that must share it
    pub fn context(&self) -> Option<ZmqContext> {
        self.context.clone()
    }

    /// Send one frame; `more` marks further frames of the same message
    pub fn send_frame(&self, bytes: &[u8], more: bool) -> Result<(), TransportError> {
        let socket = self.socket.as_ref().ok_or(TransportError::NotBound)?;
        let flags = if more { zmq::SNDMORE } else { 0 };
        socket.send(bytes, flags).map_err(TransportError::Send)
    }

    /// Discard queued messages, close the socket and release the context
    ///
    /// Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(socket) = self.socket.take() {
            if let Err(source) = socket.set_linger(0) {
                let e = TransportError::SetOption {
                    option: "ZMQ_LINGER",
                    source,
                };
                error!(target: "zmq", errno = ?e.errno(), "Error: {}", e);
            }
            drop(socket);
        }
        // The context terminates once the last handle to it is gone.
        if self.context.take().is_some() {
            debug!(target: "zmq", "PUB socket at {} closed", self.endpoint);
        }
    }
}

impl FrameSink for PubTransport {
    fn send_frame(&self, bytes: &[u8], more: bool) -> Result<(), TransportError> {
        PubTransport::send_frame(self, bytes, more)
    }
}

impl Drop for PubTransport {
    fn drop(&mut self) {
        self.close();
    }
}
