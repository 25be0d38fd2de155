//! Scoring a single simulated placement.
//!
//! The score is a plain weighted sum over the 14 features: `value =
//! Σ weight[key] × feature[key]`. Features are raw and unnormalized by design;
//! see the crate docs for why the scales must be preserved exactly.

use blockmind_engine::GameState;

use crate::{feature::Feature, placement_analysis::PlacementAnalysis, weights::WeightVector};

/// Evaluates one simulated placement against the originating state.
///
/// Higher is better. The value is unbounded in both directions; weight
/// magnitudes encode the relative scale of each feature.
#[must_use]
pub fn evaluate_placement(
    analysis: &PlacementAnalysis,
    state: &GameState,
    weights: &WeightVector,
) -> f64 {
    Feature::ALL
        .into_iter()
        .map(|feature| weights.get(feature) * feature.extract(analysis, state))
        .sum()
}

#[cfg(test)]
mod tests {
    use blockmind_engine::{Grid, Hand, Piece};

    use super::*;

    #[test]
    fn test_single_weight_isolates_one_feature() {
        let grid = Grid::from_ascii(
            r"
            ###.
            ....
            ....
            ....
            ",
        );
        let state = GameState::new(grid, Hand::default(), 0, false, 0);
        let piece = Piece::new(&[(0, 0)]);
        let analysis = PlacementAnalysis::simulate(&state, &piece, 3, 0).unwrap();

        let weights = WeightVector::from_fn(|f| f64::from(u8::from(f == Feature::ClearedLines)));
        assert_eq!(evaluate_placement(&analysis, &state, &weights), 1.0);
    }

    #[test]
    fn test_clearing_move_beats_burying_move_under_fallback() {
        let grid = Grid::from_ascii(
            r"
            #######.
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let state = GameState::new(grid, Hand::default(), 0, false, 0);
        let piece = Piece::new(&[(0, 0)]);
        let weights = WeightVector::fallback();

        let clearing = PlacementAnalysis::simulate(&state, &piece, 7, 0).unwrap();
        let stacking = PlacementAnalysis::simulate(&state, &piece, 0, 1).unwrap();

        assert!(
            evaluate_placement(&clearing, &state, &weights)
                > evaluate_placement(&stacking, &state, &weights)
        );
    }
}
