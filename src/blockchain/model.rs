use log::{debug, info};

use super::block::{Block, PreviousHash, hash};
use super::validator::is_valid_chain;
use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, MINING_REWARD, MINING_REWARD_SENDER};
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.seal_block(
            GENESIS_PROOF,
            Some(PreviousHash::Sentinel(GENESIS_PREVIOUS_HASH)),
        );
        ledger
    }

    /// Append a block with the given proof, embedding the whole pending pool.
    ///
    /// `previous_hash` defaults to the digest of the current last block. The
    /// proof is taken as is; callers must have solved it beforehand.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<PreviousHash>) -> &Block {
        let previous_hash =
            previous_hash.unwrap_or_else(|| PreviousHash::Digest(hash(self.last_block())));
        let block = Block::new(
            self.chain.len() as u64 + 1,
            std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        debug!(
            "LEDGER - sealed block #{} with {} txs",
            block.index,
            block.transactions.len()
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Queue the mining reward and seal, but only if the tip is still the
    /// block the proof was solved against.
    ///
    /// On a stale tip nothing changes, the reward included.
    pub fn seal_mined_block(
        &mut self,
        parent_index: u64,
        proof: u64,
        miner: &str,
    ) -> Result<&Block, LedgerError> {
        let tip = self.last_block().index;
        if tip != parent_index {
            return Err(LedgerError::StaleTip {
                expected: parent_index,
                found: tip,
            });
        }
        self.queue_transaction(MINING_REWARD_SENDER, miner, MINING_REWARD);
        Ok(self.seal_block(proof, None))
    }

    /// Add a transaction to the pending pool.
    ///
    /// Returns the index of the block that will hold it.
    pub fn queue_transaction(
        &mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: u64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, receiver, amount));
        self.last_block().index + 1
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    /// Swap in `candidate` wholesale if it is valid and strictly longer.
    pub fn replace_chain(&mut self, candidate: Vec<Block>) -> bool {
        if candidate.len() <= self.chain.len() {
            debug!(
                "LEDGER - kept local chain ({} >= {})",
                self.chain.len(),
                candidate.len()
            );
            return false;
        }
        if !is_valid_chain(&candidate) {
            return false;
        }
        info!(
            "LEDGER - chain replaced: {} -> {} blocks",
            self.chain.len(),
            candidate.len()
        );
        self.chain = candidate;
        true
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_valid(&self) -> bool {
        is_valid_chain(&self.chain)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
