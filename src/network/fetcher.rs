use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::FetchError;

/// Path of the chain endpoint every node exposes.
pub const CHAIN_ENDPOINT: &str = "/api/v1/chain/";

/// A peer's chain as it reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChain {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Source of peer chains for conflict resolution.
#[async_trait]
pub trait ChainFetcher: Send + Sync {
    /// Fetch the full chain of `peer` (a `host[:port]` authority).
    async fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError>;
}

/// Fetches chains over HTTP from other nodes running this service.
pub struct HttpChainFetcher {
    client: reqwest::Client,
}

impl HttpChainFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError> {
        let url = format!("http://{peer}{CHAIN_ENDPOINT}");
        debug!("FETCH - GET {url}");

        let classify = |source: reqwest::Error| {
            if source.is_connect() || source.is_timeout() {
                FetchError::Unreachable {
                    peer: peer.to_string(),
                }
            } else {
                FetchError::Request {
                    peer: peer.to_string(),
                    source,
                }
            }
        };

        let response = self.client.get(&url).send().await.map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }
        response.json::<PeerChain>().await.map_err(classify)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use actix_web::{HttpResponse, web};

    use super::{CHAIN_ENDPOINT, ChainFetcher, HttpChainFetcher, PeerChain};
    use crate::api::{AppState, init_routes};
    use crate::blockchain::Ledger;
    use crate::blockchain::consensus::resolve_conflicts;
    use crate::error::FetchError;
    use crate::test_utils::{StaticFetcher, mined_chain, spawn_server};

    fn failing_peer() -> (String, actix_web::dev::ServerHandle) {
        spawn_server(|cfg| {
            cfg.route(
                CHAIN_ENDPOINT,
                web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
            );
        })
    }

    fn garbage_peer() -> (String, actix_web::dev::ServerHandle) {
        spawn_server(|cfg| {
            cfg.route(
                CHAIN_ENDPOINT,
                web::get().to(|| async { HttpResponse::Ok().body("not a chain") }),
            );
        })
    }

    /// A full node whose chain has `length` blocks.
    fn node_peer(length: usize) -> (String, actix_web::dev::ServerHandle) {
        let state = web::Data::new(AppState::new(
            "peer".to_string(),
            Arc::new(StaticFetcher::default()),
        ));
        assert!(state.ledger.lock().unwrap().replace_chain(mined_chain(length)));
        spawn_server(move |cfg| {
            cfg.app_data(state.clone());
            init_routes(cfg);
        })
    }

    fn fetcher() -> HttpChainFetcher {
        HttpChainFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn decodes_the_chain_endpoint_shape() {
        let chain = mined_chain(2);
        let body = serde_json::json!({ "length": 2, "chain": chain });
        let decoded: PeerChain = serde_json::from_value(body).unwrap();
        assert_eq!(decoded.length, 2);
        assert_eq!(decoded.chain, chain);
    }

    #[actix_web::test]
    async fn closed_port_is_unreachable() {
        let fetcher = HttpChainFetcher::new(Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch_chain("127.0.0.1:1").await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable { .. }), "got {err}");
    }

    #[actix_web::test]
    async fn error_status_is_reported() {
        let (peer, server) = failing_peer();
        let err = fetcher().fetch_chain(&peer).await.unwrap_err();
        assert!(
            matches!(err, FetchError::Status { status: 500, .. }),
            "got {err}"
        );
        server.stop(false).await;
    }

    #[actix_web::test]
    async fn undecodable_body_is_a_request_error() {
        let (peer, server) = garbage_peer();
        let err = fetcher().fetch_chain(&peer).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }), "got {err}");
        server.stop(false).await;
    }

    #[actix_web::test]
    async fn fetches_a_running_node() {
        let (peer, server) = node_peer(3);
        let snapshot = fetcher().fetch_chain(&peer).await.unwrap();
        assert_eq!(snapshot.length, 3);
        assert_eq!(snapshot.chain.len(), 3);
        server.stop(false).await;
    }

    #[actix_web::test]
    async fn resolve_skips_failing_peers_over_http() {
        let (failing, failing_server) = failing_peer();
        let (garbage, garbage_server) = garbage_peer();
        let (node, node_server) = node_peer(4);

        let ledger = Mutex::new(Ledger::new());
        let peers = vec![failing, garbage, "127.0.0.1:1".to_string(), node];
        let replaced = resolve_conflicts(&ledger, &peers, &fetcher()).await;

        assert!(replaced);
        let ledger = ledger.lock().unwrap();
        assert_eq!(ledger.len(), 4);
        assert!(ledger.is_valid());

        failing_server.stop(false).await;
        garbage_server.stop(false).await;
        node_server.stop(false).await;
    }
}
