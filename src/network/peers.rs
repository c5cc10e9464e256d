use std::collections::BTreeSet;

use url::Url;

use crate::error::PeerError;

/// Known peer nodes, keyed by network authority (`host[:port]`).
#[derive(Debug, Default)]
pub struct PeerSet {
    peers: BTreeSet<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer. Returns `true` if it was not known yet.
    pub fn register(&mut self, address: &str) -> Result<bool, PeerError> {
        let authority = normalize_address(address)?;
        Ok(self.insert(authority))
    }

    /// Insert an authority already produced by [`normalize_address`].
    pub fn insert(&mut self, authority: String) -> bool {
        self.peers.insert(authority)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.peers.iter()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Reduce an address like `http://10.0.0.5:5000/path` to `10.0.0.5:5000`.
///
/// Addresses without a scheme are read as `http://`. Peers are always
/// contacted over plain HTTP, so a non-`http` scheme keeps its port even
/// when it is that scheme's default (`https://host` becomes `host:443`).
pub fn normalize_address(address: &str) -> Result<String, PeerError> {
    let invalid = || PeerError::InvalidAddress(address.to_string());

    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|_| invalid())?;
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let port = if url.scheme() == "http" {
        url.port()
    } else {
        url.port_or_known_default()
    };
    Ok(match port {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
