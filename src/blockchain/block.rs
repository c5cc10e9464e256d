use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// Link from a block to its predecessor.
///
/// The genesis block carries a bare integer sentinel instead of a digest, so
/// both shapes must survive a JSON round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviousHash {
    Sentinel(u64),
    Digest(String),
}

impl PreviousHash {
    /// True if this link points at a block with the given digest.
    pub fn points_to(&self, digest: &str) -> bool {
        matches!(self, PreviousHash::Digest(d) if d == digest)
    }
}

/// A sealed block. Never mutated once it is part of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

impl Block {
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: PreviousHash,
    ) -> Self {
        Self {
            index,
            timestamp: Utc::now().timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }
}

/// SHA-256 of the block's canonical JSON form, hex encoded.
///
/// Going through `serde_json::Value` sorts every object's keys, so the digest
/// depends only on field names and values, never on declaration or wire order.
pub fn hash(block: &Block) -> String {
    let canonical = serde_json::to_value(block).expect("block serializes to JSON");
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
