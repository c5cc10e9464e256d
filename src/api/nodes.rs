use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::blockchain::consensus::resolve_conflicts;
use crate::network::peers::normalize_address;

/// Register peer nodes. Either every address is accepted or none is.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(nodes) = body.into_inner().nodes else {
        return HttpResponse::BadRequest().body("Error: please supply a valid list of nodes");
    };

    let authorities = match nodes
        .iter()
        .map(|n| normalize_address(n))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(authorities) => authorities,
        Err(err) => {
            warn!("POST /nodes/register/ - rejected: {err}");
            return HttpResponse::BadRequest().body(err.to_string());
        }
    };

    let total_nodes: Vec<String> = {
        let mut peers = state.peers.lock().expect("mutex poisoned");
        for authority in authorities {
            if peers.insert(authority.clone()) {
                info!("NODES - registered peer {authority}");
            }
        }
        peers.iter().cloned().collect()
    };

    HttpResponse::Ok().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes,
    })
}

/// Run conflict resolution against every known peer.
#[get("/nodes/resolve/")]
pub async fn resolve(state: web::Data<AppState>) -> impl Responder {
    let peers: Vec<String> = {
        let peers = state.peers.lock().expect("mutex poisoned");
        peers.iter().cloned().collect()
    };

    let replaced = resolve_conflicts(&state.ledger, &peers, state.fetcher.as_ref()).await;
    if replaced {
        state.tip_changed();
    }

    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ResolveResponse {
        message: if replaced {
            "Our chain was replaced"
        } else {
            "Our chain is authoritative"
        },
        replaced,
        chain: ledger.chain(),
    })
}
