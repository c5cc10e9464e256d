use thiserror::Error;

/// Failures of mutating ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The chain moved on while a proof was being searched for.
    #[error("stale tip: proof was solved on block #{expected}, tip is now #{found}")]
    StaleTip { expected: u64, found: u64 },
}

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("invalid peer address: {0:?}")]
    InvalidAddress(String),
}

/// Why a peer's chain could not be obtained. Always recoverable: the peer is
/// skipped for this round of conflict resolution.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {peer} failed: {source}")]
    Request {
        peer: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{peer} answered with status {status}")]
    Status { peer: String, status: u16 },

    #[error("{peer} is unreachable")]
    Unreachable { peer: String },
}
