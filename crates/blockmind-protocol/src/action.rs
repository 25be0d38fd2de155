//! Action publication and the consumer-side ledger.
//!
//! Each published action carries a strictly increasing move identifier. The
//! publisher guarantees ordering on its side by incrementing a local counter;
//! the consumer enforces at-most-once application by tracking the last id it
//! applied and rejecting anything not strictly greater - that check, not
//! producer-side uniqueness, is what protects against replays when the agent
//! crashes and restarts with a fresh counter.
//!
//! The consumer always deletes the action file after reading it, valid or
//! not, so a rejected or malformed action can never be picked up twice.

use std::{
    fs,
    path::{Path, PathBuf},
};

use blockmind_engine::GameState;
use blockmind_evaluator::move_search::ChosenMove;
use serde::{Deserialize, Serialize};

use crate::atomic::{ProtocolError, read_json_opt, write_json_atomic};

/// One action record on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub move_id: u64,
    pub slot: usize,
    pub gx: usize,
    pub gy: usize,
}

/// Publishes actions to the canonical action path with increasing move ids.
#[derive(Debug)]
pub struct ActionPublisher {
    path: PathBuf,
    next_move_id: u64,
}

impl ActionPublisher {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            next_move_id: 0,
        }
    }

    /// Atomically writes the chosen move and returns its move id.
    ///
    /// The counter only advances when the write succeeds, so a failed publish
    /// does not burn an id.
    pub fn publish(&mut self, chosen: &ChosenMove) -> Result<u64, ProtocolError> {
        let move_id = self.next_move_id + 1;
        let action = Action {
            move_id,
            slot: chosen.slot,
            gx: chosen.x,
            gy: chosen.y,
        };
        write_json_atomic(&self.path, &action)?;
        self.next_move_id = move_id;
        Ok(move_id)
    }

    /// Number of actions published so far.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.next_move_id
    }
}

/// Why the consumer discarded an action file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Move id not strictly greater than the last applied one.
    NonIncreasingId,
    /// Slot out of range or empty in the current hand.
    InvalidSlot,
    /// Placement out of bounds or colliding with occupied cells.
    IllegalPlacement,
}

/// Outcome of one consumption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    /// No action file was present, or it did not parse.
    Nothing,
    /// The action was rejected and silently dropped.
    Rejected(RejectReason),
    /// The action passed every check and the ledger advanced.
    Accepted(Action),
}

/// The consumer-side "last applied id" ledger.
///
/// This models the game-process side of the contract and backs the protocol
/// tests; the consumer is authoritative and self-protecting, so rejections are
/// silent and nothing is ever surfaced back to the producer.
#[derive(Debug, Default)]
pub struct ActionConsumer {
    last_applied: u64,
}

impl ActionConsumer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }

    /// Reads, validates, and deletes the action file.
    ///
    /// The file is removed regardless of validity. Validation checks the move
    /// id against the ledger, then slot occupancy and placement legality
    /// against the provided state.
    pub fn consume(&mut self, path: &Path, state: &GameState) -> Consumed {
        let action: Option<Action> = read_json_opt(path);
        let _ = fs::remove_file(path);
        let Some(action) = action else {
            return Consumed::Nothing;
        };

        if action.move_id <= self.last_applied {
            return Consumed::Rejected(RejectReason::NonIncreasingId);
        }
        let Some(piece) = state.hand().slot(action.slot) else {
            return Consumed::Rejected(RejectReason::InvalidSlot);
        };
        if !state.grid().can_place(piece, action.gx, action.gy) {
            return Consumed::Rejected(RejectReason::IllegalPlacement);
        }

        self.last_applied = action.move_id;
        Consumed::Accepted(action)
    }
}
