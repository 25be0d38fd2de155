//! Exhaustive one-ply search over every legal placement.
//!
//! Enumeration covers each non-empty hand slot crossed with every board
//! position, with no pruning and no lookahead. At board size 8 with up to 3
//! held pieces this is a few hundred to low thousands of simulated placements
//! per decision, well within a single polling interval.

use blockmind_engine::GameState;

use crate::{
    placement_analysis::PlacementAnalysis, placement_evaluator::evaluate_placement,
    weights::WeightVector,
};

/// The placement the search selected: hand slot and target board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenMove {
    pub slot: usize,
    pub x: usize,
    pub y: usize,
}

/// Selects the highest-scoring legal placement, or `None` when no legal move
/// exists (a pass for this cycle, not an error).
///
/// Enumeration order is hand slot ascending, then y ascending, then x
/// ascending, and the comparison is strict, so the first-seen maximum wins
/// ties. This ordering is part of the contract: it makes the search
/// deterministic for a given state and weight vector.
#[must_use]
pub fn choose_best_move(state: &GameState, weights: &WeightVector) -> Option<ChosenMove> {
    let size = state.grid().size();
    let mut best_value = f64::NEG_INFINITY;
    let mut best_move = None;

    for (slot, piece) in state.hand().held() {
        for y in 0..size {
            for x in 0..size {
                let Some(analysis) = PlacementAnalysis::simulate(state, piece, x, y) else {
                    continue;
                };
                let value = evaluate_placement(&analysis, state, weights);
                if value > best_value {
                    best_value = value;
                    best_move = Some(ChosenMove { slot, x, y });
                }
            }
        }
    }

    best_move
}
