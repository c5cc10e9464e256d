use crate::blockchain::{Block, Ledger, PreviousHash};
use crate::network::{ChainFetcher, PeerSet};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Shared application state: one ledger per node plus its peer set.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub peers: Mutex<PeerSet>,
    /// Receiver of mining rewards.
    pub node_id: String,
    pub fetcher: Arc<dyn ChainFetcher>,
    /// Bumped whenever the chain tip changes; running proof searches compare
    /// against it to notice they are working on a stale tip.
    tip_version: AtomicU64,
}

impl AppState {
    pub fn new(node_id: String, fetcher: Arc<dyn ChainFetcher>) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            peers: Mutex::new(PeerSet::new()),
            node_id,
            fetcher,
            tip_version: AtomicU64::new(0),
        }
    }

    pub fn tip_version(&self) -> u64 {
        self.tip_version.load(Ordering::Acquire)
    }

    pub fn tip_changed(&self) {
        self.tip_version.fetch_add(1, Ordering::AcqRel);
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: i64,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

/* ---------- TX API Models ---------- */

/// Fields are optional so a missing one can be reported explicitly.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    #[serde(alias = "receiver")]
    pub recipient: Option<String>,
    pub amount: Option<u64>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse<'a> {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: &'a [Block],
}
