use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, error, info, warn};

use super::models::{AppState, ChainResponse, MineResponse, ValidateResponse};
use crate::blockchain::pow;

/// How often mining restarts on a fresh tip before giving up.
const MINE_MAX_ATTEMPTS: usize = 3;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        length: ledger.len(),
        chain: ledger.chain(),
    })
}

/// Validate the local chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: ledger.is_valid(),
        length: ledger.len(),
    })
}

/// Mine a new block from the pending pool:
/// - Snapshot the tip and release the ledger lock
/// - Solve PoW on the blocking pool, abandoning the search if the tip moves
/// - Queue the reward to this node and seal, unless the tip went stale
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    mine_with(state, |state, last_proof, version| {
        pow::solve_until(last_proof, || state.tip_version() != version)
    })
    .await
}

/// Mining loop behind [`mine_block`]. `search` gets the state, the tip's proof
/// and the tip version seen at snapshot time, and returns `None` once it gives
/// up on that tip.
async fn mine_with<F>(state: web::Data<AppState>, search: F) -> HttpResponse
where
    F: Fn(web::Data<AppState>, u64, u64) -> Option<u64> + Clone + Send + 'static,
{
    for attempt in 1..=MINE_MAX_ATTEMPTS {
        let (parent_index, last_proof, version) = {
            let ledger = state.ledger.lock().expect("mutex poisoned");
            let last = ledger.last_block();
            (last.index, last.proof, state.tip_version())
        };
        debug!("MINER - attempt {attempt}: solving on block #{parent_index} (proof={last_proof})");

        let search = search.clone();
        let search_state = state.clone();
        let outcome = web::block(move || search(search_state, last_proof, version)).await;

        let proof = match outcome {
            Ok(Some(proof)) => proof,
            Ok(None) => {
                warn!("MINER - tip moved during search on block #{parent_index}, restarting");
                continue;
            }
            Err(err) => {
                error!("MINER - proof search aborted: {err}");
                return HttpResponse::InternalServerError().body("proof search aborted");
            }
        };

        let sealed = {
            let mut ledger = state.ledger.lock().expect("mutex poisoned");
            match ledger.seal_mined_block(parent_index, proof, &state.node_id) {
                Ok(block) => {
                    let block = block.clone();
                    state.tip_changed();
                    Some(block)
                }
                Err(err) => {
                    warn!("MINER - {err}, restarting");
                    None
                }
            }
        };

        if let Some(block) = sealed {
            info!(
                "MINER - sealed block #{} (proof={}, txs={})",
                block.index,
                block.proof,
                block.transactions.len()
            );
            return HttpResponse::Ok().json(MineResponse {
                message: "New block has been mined",
                index: block.index,
                transactions: block.transactions,
                timestamp: block.timestamp,
                proof: block.proof,
                previous_hash: block.previous_hash,
            });
        }
    }

    HttpResponse::Conflict().body("chain tip kept moving while mining, try again")
}
