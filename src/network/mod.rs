pub mod fetcher;
pub mod peers;

pub use fetcher::{ChainFetcher, HttpChainFetcher, PeerChain};
pub use peers::PeerSet;
