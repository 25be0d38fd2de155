//! One candidate placement simulated on a cloned grid.
//!
//! A [`PlacementAnalysis`] exists only for the duration of scoring a single
//! candidate move and is never retained: the search loop builds one, extracts
//! features from it, and drops it.

use blockmind_engine::{GameState, Grid, Piece, score_gain};

/// The ephemeral result of applying one candidate placement.
///
/// Carries the post-clear grid, the cleared-line count, the move's total score
/// delta, and the placement that produced it.
#[derive(Debug)]
pub struct PlacementAnalysis {
    grid: Grid,
    cleared_lines: usize,
    score_gain: u64,
    piece: Piece,
    x: usize,
    y: usize,
}

impl PlacementAnalysis {
    /// Simulates placing `piece` at `(x, y)` on a clone of the state's grid.
    ///
    /// Returns `None` when the placement is illegal. The score delta is the
    /// per-cell placement score plus the clear bonus computed from the
    /// pre-move combo.
    #[must_use]
    pub fn simulate(state: &GameState, piece: &Piece, x: usize, y: usize) -> Option<Self> {
        if !state.grid().can_place(piece, x, y) {
            return None;
        }
        let mut grid = state.grid().clone();
        grid.place(piece, x, y);
        let cleared_lines = grid.clear_lines();
        let score_gain = piece.len() as u64 + score_gain(cleared_lines, state.combo());

        Some(Self {
            grid,
            cleared_lines,
            score_gain,
            piece: piece.clone(),
            x,
            y,
        })
    }

    /// The board after placement and clearing.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rows plus columns cleared by this placement.
    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Total score delta: placement cells plus clear bonus.
    #[must_use]
    pub fn score_gain(&self) -> u64 {
        self.score_gain
    }

    /// The placed piece's cells translated to board coordinates.
    pub fn placed_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.piece
            .cells()
            .iter()
            .map(move |&(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[cfg(test)]
mod tests {
    use blockmind_engine::Hand;

    use super::*;

    #[test]
    fn test_simulate_rejects_illegal_placement() {
        let state = GameState::new(Grid::empty(4), Hand::default(), 0, false, 0);
        let piece = Piece::new(&[(0, 0), (1, 0)]);
        assert!(PlacementAnalysis::simulate(&state, &piece, 3, 0).is_none());
    }

    #[test]
    fn test_simulate_does_not_mutate_the_state() {
        let state = GameState::new(Grid::empty(4), Hand::default(), 0, false, 0);
        let piece = Piece::new(&[(0, 0)]);
        let analysis = PlacementAnalysis::simulate(&state, &piece, 1, 1).unwrap();
        assert!(analysis.grid().cell(1, 1));
        assert!(!state.grid().cell(1, 1));
    }

    #[test]
    fn test_simulate_scores_placement_and_clear() {
        let grid = Grid::from_ascii(
            r"
            ###.
            ....
            ....
            ....
            ",
        );
        let state = GameState::new(grid, Hand::default(), 1, true, 0);
        let piece = Piece::new(&[(0, 0)]);
        let analysis = PlacementAnalysis::simulate(&state, &piece, 3, 0).unwrap();

        assert_eq!(analysis.cleared_lines(), 1);
        // 1 placement cell + 10 * 1 * (combo 1 + 1) clear bonus.
        assert_eq!(analysis.score_gain(), 21);
        // The completed row is gone from the post-clear grid.
        assert!(!analysis.grid().cell(0, 0));
    }

    #[test]
    fn test_placed_cells_are_translated() {
        let state = GameState::new(Grid::empty(4), Hand::default(), 0, false, 0);
        let piece = Piece::new(&[(0, 0), (1, 0), (0, 1)]);
        let analysis = PlacementAnalysis::simulate(&state, &piece, 1, 2).unwrap();
        let cells: Vec<(usize, usize)> = analysis.placed_cells().collect();
        assert_eq!(cells, vec![(1, 2), (1, 3), (2, 2)]);
    }
}
