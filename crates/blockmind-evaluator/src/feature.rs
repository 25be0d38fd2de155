//! The 14 named board features and their extraction rules.
//!
//! Feature values are raw measurements; nothing here is normalized or clipped.
//! Most features read the post-clear board, while `edge_penalty` and
//! `piece_fit` additionally look at the placed piece's translated cells, and
//! `combo_preservation` reads the pre-move combo flag from the originating
//! [`GameState`].

use blockmind_engine::{GameState, Grid};

use crate::placement_analysis::PlacementAnalysis;

/// A named feature of a simulated post-move board.
///
/// The discriminant order fixes the key order in serialized weight files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Empty cells with at least one filled cell above them in their column.
    Holes,
    /// Height of the tallest column (`size - topmost_filled_row`).
    MaxHeight,
    /// Mean column height; empty columns count as 0.
    AvgHeight,
    /// Total filled cells on the board.
    Filled,
    /// Placed-piece cells lying on the board's outer ring.
    EdgePenalty,
    /// Sum over filled cells of their filled 4-neighbor count.
    ClusterScore,
    /// Rows with `size - 2` or `size - 1` cells filled.
    RowAlmostFull,
    /// Columns with `size - 2` or `size - 1` cells filled.
    ColAlmostFull,
    /// Fully empty rows.
    EmptyRows,
    /// Clear bonus scaled by whether the pre-move combo was active.
    ComboPreservation,
    /// Placed-piece cells' filled-or-out-of-bounds orthogonal neighbors.
    PieceFit,
    /// Negative population standard deviation of column heights.
    Diversity,
    /// Lines cleared by this move.
    ClearedLines,
    /// The move's total score delta (placement cells + clear bonus).
    ImmediateGain,
}

impl Feature {
    pub const COUNT: usize = 14;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Holes,
        Feature::MaxHeight,
        Feature::AvgHeight,
        Feature::Filled,
        Feature::EdgePenalty,
        Feature::ClusterScore,
        Feature::RowAlmostFull,
        Feature::ColAlmostFull,
        Feature::EmptyRows,
        Feature::ComboPreservation,
        Feature::PieceFit,
        Feature::Diversity,
        Feature::ClearedLines,
        Feature::ImmediateGain,
    ];

    /// The snake_case key used in weight files.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Feature::Holes => "holes",
            Feature::MaxHeight => "max_height",
            Feature::AvgHeight => "avg_height",
            Feature::Filled => "filled",
            Feature::EdgePenalty => "edge_penalty",
            Feature::ClusterScore => "cluster_score",
            Feature::RowAlmostFull => "row_almost_full",
            Feature::ColAlmostFull => "col_almost_full",
            Feature::EmptyRows => "empty_rows",
            Feature::ComboPreservation => "combo_preservation",
            Feature::PieceFit => "piece_fit",
            Feature::Diversity => "diversity",
            Feature::ClearedLines => "cleared_lines",
            Feature::ImmediateGain => "immediate_gain",
        }
    }

    /// Looks a feature up by its weight-file key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Extracts this feature's raw value for one simulated placement.
    #[must_use]
    pub fn extract(self, analysis: &PlacementAnalysis, state: &GameState) -> f64 {
        let grid = analysis.grid();
        match self {
            Feature::Holes => to_f64(holes(grid)),
            Feature::MaxHeight => to_f64(column_heights(grid).max().unwrap_or(0)),
            Feature::AvgHeight => avg_height(grid),
            Feature::Filled => to_f64(filled(grid)),
            Feature::EdgePenalty => to_f64(edge_cells(analysis)),
            Feature::ClusterScore => to_f64(cluster_score(grid)),
            Feature::RowAlmostFull => to_f64(rows_almost_full(grid)),
            Feature::ColAlmostFull => to_f64(cols_almost_full(grid)),
            Feature::EmptyRows => to_f64(empty_rows(grid)),
            Feature::ComboPreservation => {
                combo_preservation(state.combo_active(), analysis.cleared_lines())
            }
            Feature::PieceFit => to_f64(piece_fit(analysis)),
            Feature::Diversity => diversity(grid),
            Feature::ClearedLines => to_f64(analysis.cleared_lines()),
            #[expect(clippy::cast_precision_loss)]
            Feature::ImmediateGain => analysis.score_gain() as f64,
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn to_f64(n: usize) -> f64 {
    n as f64
}

/// Height of each column: `size - y` for the topmost filled cell, 0 if empty.
fn column_heights(grid: &Grid) -> impl Iterator<Item = usize> + '_ {
    let size = grid.size();
    (0..size).map(move |x| {
        (0..size)
            .find(|&y| grid.cell(x, y))
            .map_or(0, |y| size - y)
    })
}

/// Empty cells below a filled cell in the same column, scanned top to bottom.
fn holes(grid: &Grid) -> usize {
    let size = grid.size();
    let mut holes = 0;
    for x in 0..size {
        let mut seen_block = false;
        for y in 0..size {
            if grid.cell(x, y) {
                seen_block = true;
            } else if seen_block {
                holes += 1;
            }
        }
    }
    holes
}

fn avg_height(grid: &Grid) -> f64 {
    let total: usize = column_heights(grid).sum();
    to_f64(total) / to_f64(grid.size())
}

fn filled(grid: &Grid) -> usize {
    let size = grid.size();
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .filter(|&(x, y)| grid.cell(x, y))
        .count()
}

/// Placed-piece cells on the outer ring (x or y at 0 or size - 1).
fn edge_cells(analysis: &PlacementAnalysis) -> usize {
    let size = analysis.grid().size();
    analysis
        .placed_cells()
        .filter(|&(x, y)| x == 0 || x == size - 1 || y == 0 || y == size - 1)
        .count()
}

const ORTHOGONAL: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Sum over filled cells of their filled 4-neighbor count. Each adjacent pair
/// contributes twice, once from each side.
fn cluster_score(grid: &Grid) -> usize {
    let size = grid.size() as i64;
    let mut cluster = 0;
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            if !grid.cell(x, y) {
                continue;
            }
            for (dx, dy) in ORTHOGONAL {
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if (0..size).contains(&nx)
                    && (0..size).contains(&ny)
                    && grid.cell(nx as usize, ny as usize)
                {
                    cluster += 1;
                }
            }
        }
    }
    cluster
}

fn rows_almost_full(grid: &Grid) -> usize {
    let size = grid.size();
    (0..size)
        .filter(|&y| {
            let filled = (0..size).filter(|&x| grid.cell(x, y)).count();
            filled >= size - 2 && filled < size
        })
        .count()
}

fn cols_almost_full(grid: &Grid) -> usize {
    let size = grid.size();
    (0..size)
        .filter(|&x| {
            let filled = (0..size).filter(|&y| grid.cell(x, y)).count();
            filled >= size - 2 && filled < size
        })
        .count()
}

fn empty_rows(grid: &Grid) -> usize {
    let size = grid.size();
    (0..size)
        .filter(|&y| (0..size).all(|x| !grid.cell(x, y)))
        .count()
}

/// 0 with no clear; `30 * cleared` when the pre-move combo was active, else
/// `10 * cleared`.
fn combo_preservation(combo_active: bool, cleared: usize) -> f64 {
    if cleared == 0 {
        return 0.0;
    }
    let scale = if combo_active { 30.0 } else { 10.0 };
    scale * to_f64(cleared)
}

/// Sum over the placed piece's cells of their filled-or-out-of-bounds
/// orthogonal neighbors, measured against the post-clear grid. Rewards snug
/// fits against walls or existing blocks.
fn piece_fit(analysis: &PlacementAnalysis) -> usize {
    let grid = analysis.grid();
    let size = grid.size() as i64;
    let mut fit = 0;
    for (x, y) in analysis.placed_cells() {
        for (dx, dy) in ORTHOGONAL {
            let (nx, ny) = (x as i64 + dx, y as i64 + dy);
            if !(0..size).contains(&nx) || !(0..size).contains(&ny) {
                fit += 1;
            } else if grid.cell(nx as usize, ny as usize) {
                fit += 1;
            }
        }
    }
    fit
}

/// Negative population standard deviation of column heights; flatter boards
/// score higher.
fn diversity(grid: &Grid) -> f64 {
    let heights: Vec<f64> = column_heights(grid).map(to_f64).collect();
    if heights.is_empty() {
        return 0.0;
    }
    let len = to_f64(heights.len());
    let avg = heights.iter().sum::<f64>() / len;
    let variance = heights.iter().map(|h| (h - avg).powi(2)).sum::<f64>() / len;
    -variance.sqrt()
}
