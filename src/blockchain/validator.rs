use log::debug;

use super::block::{Block, hash};
use super::pow::is_valid_proof;

/// Validate hash linkage and proof-of-work of an arbitrary chain.
///
/// Every block after the first must point at the digest of its predecessor
/// and carry a proof that is valid against the predecessor's proof. The first
/// block has no predecessor and is not checked on its own. An empty chain is
/// never valid.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    if chain.is_empty() {
        debug!("chain rejected: empty");
        return false;
    }

    for pair in chain.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        if !current.previous_hash.points_to(&hash(previous)) {
            debug!("chain rejected: block #{} is not linked to its parent", current.index);
            return false;
        }

        if !is_valid_proof(current.proof, previous.proof) {
            debug!("chain rejected: block #{} has an invalid proof", current.index);
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::is_valid_chain;
    use crate::blockchain::block::{PreviousHash, hash};
    use crate::blockchain::pow::is_valid_proof;
    use crate::test_utils::mined_chain;

    #[test]
    fn sequentially_mined_chain_is_valid() {
        assert!(is_valid_chain(&mined_chain(4)));
    }

    #[test]
    fn genesis_alone_is_valid() {
        assert!(is_valid_chain(&mined_chain(1)));
    }

    #[test]
    fn empty_chain_is_invalid() {
        assert!(!is_valid_chain(&[]));
    }

    #[test]
    fn tampered_amount_breaks_linkage() {
        let mut chain = mined_chain(4);
        chain[1].transactions[0].amount += 1;
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn reordered_blocks_are_rejected() {
        let mut chain = mined_chain(4);
        chain.swap(1, 2);
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn unsolved_proof_is_rejected() {
        let mut chain = mined_chain(3);
        let parent_proof = chain[1].proof;
        let bad = (0..).find(|c| !is_valid_proof(*c, parent_proof)).unwrap();
        chain[2].proof = bad;
        // linkage of the last block is still intact, only the proof is wrong
        assert!(chain[2].previous_hash.points_to(&hash(&chain[1])));
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn sentinel_link_after_genesis_is_rejected() {
        let mut chain = mined_chain(2);
        chain[1].previous_hash = PreviousHash::Sentinel(1);
        assert!(!is_valid_chain(&chain));
    }
}
