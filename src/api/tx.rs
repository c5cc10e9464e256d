use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, warn};

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Queue a new transaction for the next mined block.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender: Some(sender),
        recipient: Some(recipient),
        amount: Some(amount),
    } = body.into_inner()
    else {
        warn!("POST /transactions/new/ - rejected: missing fields");
        return HttpResponse::BadRequest().body("Missing values in transaction");
    };

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.queue_transaction(sender, recipient, amount)
    };
    debug!("POST /transactions/new/ - queued for block #{index}");

    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to block {index}"),
        index,
    })
}

/// List transactions waiting for the next block.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let pending = ledger.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: pending.len(),
        transactions: pending,
    })
}
