//! Shared fixtures for unit tests.

use std::collections::HashMap;

use actix_web::dev::ServerHandle;
use actix_web::web::ServiceConfig;
use actix_web::{App, HttpServer};
use async_trait::async_trait;

use crate::blockchain::pow::solve;
use crate::blockchain::{Block, Ledger};
use crate::error::FetchError;
use crate::network::{ChainFetcher, PeerChain};

/// Build an honestly mined chain of `length` blocks (genesis included).
/// Every block after genesis carries one user transaction.
pub fn mined_chain(length: usize) -> Vec<Block> {
    let mut ledger = Ledger::new();
    while ledger.len() < length {
        let height = ledger.len() as u64;
        ledger.queue_transaction(format!("user-{height}"), "merchant", height * 10);
        let proof = solve(ledger.last_block().proof);
        ledger.seal_block(proof, None);
    }
    ledger.chain().to_vec()
}

/// A mined chain with an interior transaction amount altered.
pub fn tampered_chain(length: usize) -> Vec<Block> {
    assert!(length >= 3, "need an interior block to tamper with");
    let mut chain = mined_chain(length);
    chain[1].transactions[0].amount += 1;
    chain
}

/// `ChainFetcher` answering from canned responses. Peers without a canned
/// response are unreachable.
#[derive(Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Option<PeerChain>>,
}

impl StaticFetcher {
    pub fn with_chain(self, peer: &str, chain: Vec<Block>) -> Self {
        let length = chain.len();
        self.with_response(peer, PeerChain { length, chain })
    }

    pub fn with_response(mut self, peer: &str, response: PeerChain) -> Self {
        self.responses.insert(peer.to_string(), Some(response));
        self
    }

    pub fn with_unreachable(mut self, peer: &str) -> Self {
        self.responses.insert(peer.to_string(), None);
        self
    }
}

#[async_trait]
impl ChainFetcher for StaticFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError> {
        self.responses
            .get(peer)
            .cloned()
            .flatten()
            .ok_or_else(|| FetchError::Unreachable {
                peer: peer.to_string(),
            })
    }
}

/// Serve `configure` on an ephemeral local port from inside an actix test.
/// Returns the `host:port` authority and a handle to stop the server.
pub fn spawn_server<F>(configure: F) -> (String, ServerHandle)
where
    F: Fn(&mut ServiceConfig) + Clone + Send + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind test server");
    let authority = server.addrs()[0].to_string();
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (authority, handle)
}
