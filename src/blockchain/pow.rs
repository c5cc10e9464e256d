use sha2::{Digest, Sha256};

use super::POW_TARGET_PREFIX;

/// How many candidates are tried between two cancellation checks.
const STOP_CHECK_INTERVAL: u64 = 1024;

/// Check a candidate nonce against the previous block's proof.
///
/// Hashes the decimal concatenation `"{previous_proof}{candidate}"` and
/// requires the hex digest to start with [`POW_TARGET_PREFIX`].
pub fn is_valid_proof(candidate: u64, previous_proof: u64) -> bool {
    let guess = format!("{previous_proof}{candidate}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    hex::encode(hasher.finalize()).starts_with(POW_TARGET_PREFIX)
}

/// Find the smallest nonce that satisfies [`is_valid_proof`].
pub fn solve(previous_proof: u64) -> u64 {
    let mut candidate = 0;
    while !is_valid_proof(candidate, previous_proof) {
        candidate += 1;
    }
    candidate
}

/// Same search as [`solve`], but gives up (returning `None`) once
/// `should_stop` reports true.
pub fn solve_until(previous_proof: u64, mut should_stop: impl FnMut() -> bool) -> Option<u64> {
    let mut candidate = 0;
    loop {
        if candidate % STOP_CHECK_INTERVAL == 0 && should_stop() {
            return None;
        }
        if is_valid_proof(candidate, previous_proof) {
            return Some(candidate);
        }
        candidate += 1;
    }
}
