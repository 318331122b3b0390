//! Block lookup for full-serialization notifications
//!
//! The publisher only needs to resolve a block hash to a block. Node storage
//! backends implement [`BlockLookup`]; [`MemoryBlockStore`] is an in-memory
//! implementation for embedding and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::primitives::{block_hash, display_hash, Block, Hash};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("block {} not found", display_hash(.0))]
    NotFound(Hash),
    #[error("block read failed: {0}")]
    Read(String),
}

/// Resolves block hashes to full blocks
pub trait BlockLookup {
    fn read_block(&self, hash: &Hash) -> Result<Block, StorageError>;
}

impl<T: BlockLookup + ?Sized> BlockLookup for std::sync::Arc<T> {
    fn read_block(&self, hash: &Hash) -> Result<Block, StorageError> {
        (**self).read_block(hash)
    }
}

/// In-memory block store keyed by block hash
#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    blocks: RwLock<HashMap<Hash, Block>>,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a block, returning its hash
    pub fn insert(&self, block: Block) -> Result<Hash, StorageError> {
        let hash = block_hash(&block);
        self.blocks
            .write()
            .map_err(|_| StorageError::Read("block store lock poisoned".to_string()))?
            .insert(hash, block);
        Ok(hash)
    }

    pub fn remove(&self, hash: &Hash) -> Result<Option<Block>, StorageError> {
        Ok(self
            .blocks
            .write()
            .map_err(|_| StorageError::Read("block store lock poisoned".to_string()))?
            .remove(hash))
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.blocks
            .read()
            .map(|blocks| blocks.contains_key(hash))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.blocks.read().map(|blocks| blocks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlockLookup for MemoryBlockStore {
    fn read_block(&self, hash: &Hash) -> Result<Block, StorageError> {
        let blocks = self
            .blocks
            .read()
            .map_err(|_| StorageError::Read("block store lock poisoned".to_string()))?;
        blocks
            .get(hash)
            .cloned()
            .ok_or(StorageError::NotFound(*hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::BlockHeader;
    use bitcoin::block::Version;
    use bitcoin::hashes::Hash as _;
    use bitcoin::{BlockHash, CompactTarget, TxMerkleNode};

    fn test_block(nonce: u32) -> Block {
        Block {
            header: BlockHeader {
                version: Version::ONE,
                prev_blockhash: BlockHash::all_zeros(),
                merkle_root: TxMerkleNode::all_zeros(),
                time: 1_231_006_505,
                bits: CompactTarget::from_consensus(0x1d00ffff),
                nonce,
            },
            txdata: vec![],
        }
    }

    #[test]
    fn test_insert_and_read() {
        let store = MemoryBlockStore::new();
        assert!(store.is_empty());

        let block = test_block(1);
        let hash = store.insert(block.clone()).unwrap();
        assert_eq!(hash, block_hash(&block));
        assert!(store.contains(&hash));
        assert_eq!(store.read_block(&hash).unwrap(), block);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_block_is_not_found() {
        let store = MemoryBlockStore::new();
        let hash = [9u8; 32];
        assert_eq!(store.read_block(&hash), Err(StorageError::NotFound(hash)));
    }

    #[test]
    fn test_remove() {
        let store = MemoryBlockStore::new();
        let hash = store.insert(test_block(2)).unwrap();
        assert!(store.remove(&hash).unwrap().is_some());
        assert!(!store.contains(&hash));
        assert!(store.remove(&hash).unwrap().is_none());
    }
}
