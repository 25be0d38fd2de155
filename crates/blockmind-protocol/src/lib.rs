//! File-based coordination protocol between the agent and the game process.
//!
//! The two processes share no memory and take no locks; they communicate only
//! through a small set of JSON files, each with a single writer:
//!
//! - the game process publishes the **snapshot** (`state.json`) and consumes
//!   the **action** (`action.json`) and **restart request** (`restart.json`)
//! - the agent publishes actions and restart requests, and owns the weight,
//!   population, cursor, best-record, and per-game stats files
//!
//! Crash safety within each writer comes from the temp-file-then-atomic-rename
//! pattern in [`atomic`]. Cross-process ordering comes from the strictly
//! increasing move identifier on each action, filtered by the consumer-side
//! last-applied ledger in [`action`] - the consumer's monotonic check, not
//! producer-side uniqueness, is the safety net against replays after an agent
//! restart.
//!
//! A snapshot the game process is concurrently about to replace may still be
//! polled; that is tolerated as eventual consistency since every action is
//! validated again at the consumer boundary.

pub use self::{action::*, atomic::*, restart::*, snapshot::*, weights_file::*};

mod action;
mod atomic;
mod restart;
mod snapshot;
mod weights_file;

/// Canonical file names within the shared data directory.
pub mod files {
    pub const STATE: &str = "state.json";
    pub const ACTION: &str = "action.json";
    pub const RESTART: &str = "restart.json";
    pub const WEIGHTS: &str = "weights.json";
    pub const STATS: &str = "stats.json";
    pub const POPULATION: &str = "population.json";
    pub const CURRENT_INDEX: &str = "current_index.json";
    pub const BEST_WEIGHTS: &str = "best_weights.json";
}
