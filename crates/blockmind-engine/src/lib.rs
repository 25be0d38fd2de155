//! Core data model and board simulator for the block-placement puzzle.
//!
//! This crate replicates the authoritative game engine's rules exactly, so that
//! the evaluator can simulate candidate placements independently of the game
//! process:
//!
//! - [`Grid`] - fixed-size square board of binary cells with placement
//!   legality checks and simultaneous row/column clearing
//! - [`Piece`] - immutable normalized cell offsets
//! - [`Hand`] - the three optional piece slots the agent reads from snapshots
//! - [`GameState`] - one poll's read-only view of the game
//! - [`score_gain`] - the clear-bonus formula, a pure function of the pre-move
//!   combo value
//!
//! Everything here is pure computation; file I/O lives in `blockmind-protocol`.

pub use self::{grid::*, piece::*, scoring::*, state::*};

mod grid;
mod piece;
mod scoring;
mod state;
