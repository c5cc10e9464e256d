pub mod block;
pub mod consensus;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::{Block, PreviousHash, hash};
pub use model::Ledger;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Genesis `previous_hash`: a bare integer, not a digest.
pub const GENESIS_PREVIOUS_HASH: u64 = 1;

/// Required hex prefix of a valid proof digest.
pub const POW_TARGET_PREFIX: &str = "000";

/// Sender of the reward transaction added to every mined block.
pub const MINING_REWARD_SENDER: &str = "0";

pub const MINING_REWARD: u64 = 1;
