//! ZMQ notification listener
//!
//! Subscribes to a BLVM node's ZMQ publisher and prints one line per
//! notification: topic and the transaction id or block hash it refers to.

use anyhow::{Context, Result};
use blvm_zmq::primitives::{
    deserialize, display_hash, header_hash, txid, BlockHeader, Hash, Transaction, BLOCK_HEADER_SIZE,
};
use blvm_zmq::utils::logging::init_logging;
use blvm_zmq::zmq::framing::{split_notification, Topic};
use blvm_zmq::zmq::PayloadFormat;
use clap::Parser;
use tracing::{debug, info, warn};

#[derive(clap::Parser, Debug)]
#[command(name = "zmq-listen")]
#[command(about = "Print block and transaction notifications from a BLVM ZMQ publisher")]
struct Args {
    /// Publisher endpoint
    #[arg(short, long, default_value = "tcp://127.0.0.1:28332")]
    endpoint: String,

    /// Topics to subscribe to (TXN, BLK); default both
    #[arg(short, long)]
    topic: Vec<String>,

    /// Payload format the publisher was started with (hash or raw)
    #[arg(short, long, default_value = "raw")]
    format: PayloadFormat,

    /// Exit after this many notifications
    #[arg(short, long)]
    count: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Identifier a notification refers to
fn notification_id(topic: Topic, payload: &[u8], format: PayloadFormat) -> Option<Hash> {
    match format {
        PayloadFormat::IdentifierOnly => payload.try_into().ok(),
        PayloadFormat::FullSerialization => match topic {
            Topic::Transaction => deserialize::<Transaction>(payload).ok().map(|tx| txid(&tx)),
            Topic::Block => {
                let header = payload.get(..BLOCK_HEADER_SIZE)?;
                deserialize::<BlockHeader>(header).ok().map(|h| header_hash(&h))
            }
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(Some(if args.verbose { "debug" } else { "info" }));

    let topics: Vec<Topic> = if args.topic.is_empty() {
        vec![Topic::Transaction, Topic::Block]
    } else {
        args.topic
            .iter()
            .map(|t| {
                Topic::from_tag(t.to_uppercase().as_bytes())
                    .with_context(|| format!("Unknown topic {t:?} (expected TXN or BLK)"))
            })
            .collect::<Result<_>>()?
    };

    let context = zmq::Context::new();
    let subscriber = context.socket(zmq::SUB)?;
    subscriber
        .connect(&args.endpoint)
        .with_context(|| format!("Failed to connect to {}", args.endpoint))?;
    for topic in &topics {
        subscriber.set_subscribe(topic.tag())?;
    }
    info!("Listening on {} ({} format)", args.endpoint, args.format);

    let mut received = 0u64;
    while args.count.map_or(true, |limit| received < limit) {
        let frames = subscriber.recv_multipart(0)?;
        let Some((topic, payload)) = split_notification(&frames) else {
            warn!("Ignoring malformed message with {} frame(s)", frames.len());
            continue;
        };
        received += 1;

        match notification_id(topic, payload, args.format) {
            Some(id) => println!(
                "{} {} ({} bytes)",
                String::from_utf8_lossy(topic.tag()),
                display_hash(&id),
                payload.len()
            ),
            None => {
                warn!(
                    "{} payload of {} bytes does not match {} format",
                    String::from_utf8_lossy(topic.tag()),
                    payload.len(),
                    args.format
                );
            }
        }
        debug!("Received {} notification(s)", received);
    }

    Ok(())
}
