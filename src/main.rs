mod api;
mod blockchain;
mod config;
mod error;
mod network;
#[cfg(test)]
mod test_utils;
mod transaction;

use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use api::AppState;
use config::Config;
use network::HttpChainFetcher;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    let fetcher = HttpChainFetcher::new(config.peer_timeout).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(config.node_id.clone(), Arc::new(fetcher)));

    {
        let mut peers = state.peers.lock().expect("mutex poisoned");
        for peer in &config.bootstrap_peers {
            if let Err(err) = peers.register(peer) {
                warn!("ignoring bootstrap peer: {err}");
            }
        }
    }

    info!(
        "⛓️ Starting ledger node {} at http://{}:{} ({} known peers)",
        config.node_id,
        config.host,
        config.port,
        state.peers.lock().expect("mutex poisoned").len()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
