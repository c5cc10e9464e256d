use std::sync::Mutex;

use futures::future::join_all;
use log::{debug, info, warn};

use super::Block;
use super::model::Ledger;
use super::validator::is_valid_chain;
use crate::network::ChainFetcher;

/// Scan `peers` for a valid chain strictly longer than `local_length`.
///
/// All peers are queried concurrently; results are then considered in peer
/// order, so among equally long winners the first peer listed wins. A peer
/// that fails to answer, or whose reported length disagrees with what it
/// sent, is skipped.
pub async fn find_longest_valid_chain(
    local_length: usize,
    peers: &[String],
    fetcher: &dyn ChainFetcher,
) -> Option<Vec<Block>> {
    let responses = join_all(peers.iter().map(|peer| fetcher.fetch_chain(peer))).await;

    let mut best_length = local_length;
    let mut best_chain = None;

    for (peer, response) in peers.iter().zip(responses) {
        let candidate = match response {
            Ok(candidate) => candidate,
            Err(err) => {
                warn!("CONSENSUS - skipping peer: {err}");
                continue;
            }
        };

        if candidate.length != candidate.chain.len() {
            warn!(
                "CONSENSUS - skipping {peer}: reported length {} but sent {} blocks",
                candidate.length,
                candidate.chain.len()
            );
            continue;
        }

        if candidate.length <= best_length {
            debug!(
                "CONSENSUS - {peer} has {} blocks, best so far {best_length}",
                candidate.length
            );
            continue;
        }

        if !is_valid_chain(&candidate.chain) {
            warn!(
                "CONSENSUS - ignoring invalid chain of {} blocks from {peer}",
                candidate.length
            );
            continue;
        }

        best_length = candidate.length;
        best_chain = Some(candidate.chain);
    }

    best_chain
}

/// Replace the local chain with the longest valid peer chain, if any.
///
/// The ledger lock is only taken to read the local length and for the final
/// swap, never while peers are being queried. Returns whether the chain was
/// replaced.
pub async fn resolve_conflicts(
    ledger: &Mutex<Ledger>,
    peers: &[String],
    fetcher: &dyn ChainFetcher,
) -> bool {
    let local_length = ledger.lock().expect("mutex poisoned").len();

    let Some(winner) = find_longest_valid_chain(local_length, peers, fetcher).await else {
        info!("CONSENSUS - local chain of {local_length} blocks is authoritative");
        return false;
    };

    ledger.lock().expect("mutex poisoned").replace_chain(winner)
}
