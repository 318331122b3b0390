//! Chain primitives carried by notifications
//!
//! Entity types and their network wire encoding come from the `bitcoin`
//! crate. Notifications identify entities by a plain 32-byte [`Hash`] in
//! internal byte order.

use bitcoin::hashes::Hash as _;

pub use bitcoin::block::Header as BlockHeader;
pub use bitcoin::consensus::encode::{deserialize, serialize};
pub use bitcoin::{Block, OutPoint, Transaction, TxIn, TxOut};

/// 32-byte hash in internal byte order
pub type Hash = [u8; 32];

/// Size of a serialized block header
pub const BLOCK_HEADER_SIZE: usize = 80;

/// Transaction id (witness data excluded)
pub fn txid(tx: &Transaction) -> Hash {
    tx.compute_txid().to_byte_array()
}

/// Block hash: double SHA256 of the 80-byte header
pub fn header_hash(header: &BlockHeader) -> Hash {
    header.block_hash().to_byte_array()
}

pub fn block_hash(block: &Block) -> Hash {
    header_hash(&block.header)
}

/// Render a hash in the byte-reversed hex form used by RPC and block explorers
pub fn display_hash(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

/// Parse a byte-reversed hex hash (the inverse of [`display_hash`])
pub fn parse_display_hash(s: &str) -> Option<Hash> {
    let bytes = hex::decode(s).ok()?;
    let mut hash: Hash = bytes.try_into().ok()?;
    hash.reverse();
    Some(hash)
}
