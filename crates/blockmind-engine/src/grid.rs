use crate::piece::Piece;

/// Square board of binary cells, stored row-major.
///
/// The side length is fixed for the lifetime of one game; every coordinate
/// access is bounds-checked. Both the agent and the external game process
/// operate on boards with identical semantics, so the operations here must
/// stay bit-exact with the authoritative engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

/// Raised when snapshot rows do not form a square grid of the declared size.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("expected {expected}x{expected} grid, got row of length {actual}")]
pub struct GridShapeError {
    pub expected: usize,
    pub actual: usize,
}

impl Grid {
    /// Creates an empty grid with the given side length.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Builds a grid from row-major binary rows as published in snapshots.
    ///
    /// Any nonzero value counts as filled. Fails if the row count or any row
    /// length differs from `size`.
    pub fn from_rows(size: usize, rows: &[Vec<u8>]) -> Result<Self, GridShapeError> {
        if rows.len() != size {
            return Err(GridShapeError {
                expected: size,
                actual: rows.len(),
            });
        }
        let mut grid = Self::empty(size);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(GridShapeError {
                    expected: size,
                    actual: row.len(),
                });
            }
            for (x, &v) in row.iter().enumerate() {
                grid.cells[y * size + x] = v != 0;
            }
        }
        Ok(grid)
    }

    /// Creates a grid from ASCII art for testing.
    /// '#' is a filled cell, '.' an empty cell; all rows must have equal length.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        let size = lines.len();
        let mut grid = Self::empty(size);
        for (y, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                size,
                "each row must have exactly {size} cells, got {} at row {y}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    grid.cells[y * size + x] = true;
                }
            }
        }
        grid
    }

    /// Returns the side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the cell at (x, y) is filled.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> bool {
        assert!(x < self.size && y < self.size);
        self.cells[y * self.size + x]
    }

    /// Fills a single cell. Test and snapshot-construction helper.
    pub fn fill_cell(&mut self, x: usize, y: usize) {
        assert!(x < self.size && y < self.size);
        self.cells[y * self.size + x] = true;
    }

    /// Checks whether the piece fits at (x, y): every translated cell must lie
    /// within bounds and be empty.
    #[must_use]
    pub fn can_place(&self, piece: &Piece, x: usize, y: usize) -> bool {
        for &(dx, dy) in piece.cells() {
            let (cx, cy) = (x + dx, y + dy);
            if cx >= self.size || cy >= self.size {
                return false;
            }
            if self.cells[cy * self.size + cx] {
                return false;
            }
        }
        true
    }

    /// Fills every translated cell of the piece.
    ///
    /// The caller must have checked [`Grid::can_place`]; the authoritative
    /// engine never places without a prior check and neither does this crate.
    pub fn place(&mut self, piece: &Piece, x: usize, y: usize) {
        debug_assert!(self.can_place(piece, x, y));
        for &(dx, dy) in piece.cells() {
            self.cells[(y + dy) * self.size + (x + dx)] = true;
        }
    }

    /// Clears every full row and full column found in a single scan.
    ///
    /// Rows and columns are detected before anything is cleared, so a clear
    /// never cascades into another within the same call. A cell belonging to
    /// both a full row and a full column is cleared once but counted in both
    /// totals. Returns rows cleared + columns cleared.
    pub fn clear_lines(&mut self) -> usize {
        let s = self.size;
        let full_rows: Vec<usize> = (0..s)
            .filter(|&y| (0..s).all(|x| self.cells[y * s + x]))
            .collect();
        let full_cols: Vec<usize> = (0..s)
            .filter(|&x| (0..s).all(|y| self.cells[y * s + x]))
            .collect();

        for &y in &full_rows {
            for x in 0..s {
                self.cells[y * s + x] = false;
            }
        }
        for &x in &full_cols {
            for y in 0..s {
                self.cells[y * s + x] = false;
            }
        }

        full_rows.len() + full_cols.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_piece() -> Piece {
        Piece::new(&[(0, 0)])
    }

    #[test]
    fn test_can_place_bounds_and_occupancy() {
        let mut grid = Grid::empty(4);
        let piece = Piece::new(&[(0, 0), (1, 0)]);

        assert!(grid.can_place(&piece, 0, 0));
        assert!(grid.can_place(&piece, 2, 3));
        assert!(!grid.can_place(&piece, 3, 0), "right cell out of bounds");

        grid.fill_cell(1, 0);
        assert!(!grid.can_place(&piece, 0, 0), "right cell occupied");
        assert!(!grid.can_place(&piece, 1, 0), "left cell occupied");
        assert!(grid.can_place(&piece, 2, 0));
    }

    #[test]
    fn test_place_fills_translated_cells() {
        let mut grid = Grid::empty(4);
        let piece = Piece::new(&[(0, 0), (1, 0), (0, 1)]);
        grid.place(&piece, 1, 2);

        assert!(grid.cell(1, 2));
        assert!(grid.cell(2, 2));
        assert!(grid.cell(1, 3));
        assert!(!grid.cell(2, 3));
    }

    #[test]
    fn test_clear_lines_single_row() {
        let mut grid = Grid::from_ascii(
            r"
            ####
            #...
            ....
            ....
            ",
        );
        assert_eq!(grid.clear_lines(), 1);
        assert!(!grid.cell(0, 0));
        assert!(grid.cell(0, 1), "partial row untouched");
    }

    #[test]
    fn test_clear_lines_row_and_column_intersect() {
        // Row 0 and column 0 are both full; the shared corner cell is cleared
        // once while the count reports both lines.
        let mut grid = Grid::from_ascii(
            r"
            ####
            #...
            #...
            #...
            ",
        );
        assert_eq!(grid.clear_lines(), 2);
        for y in 0..4 {
            for x in 0..4 {
                assert!(!grid.cell(x, y), "cell ({x}, {y}) should be cleared");
            }
        }
    }

    #[test]
    fn test_clear_lines_no_cascade() {
        // Column 0 is full, row 3 is one short of full. Clearing column 0 must
        // not trigger a rescan that sees row 3 as newly clearable.
        let mut grid = Grid::from_ascii(
            r"
            #...
            #...
            #...
            #.##
            ",
        );
        assert_eq!(grid.clear_lines(), 1);
        assert!(grid.cell(2, 3));
        assert!(grid.cell(3, 3));
    }

    #[test]
    fn test_clear_lines_everything_full() {
        let mut grid = Grid::empty(3);
        for y in 0..3 {
            for x in 0..3 {
                grid.fill_cell(x, y);
            }
        }
        assert_eq!(grid.clear_lines(), 6);
        assert_eq!(grid, Grid::empty(3));
    }

    #[test]
    fn test_from_rows_shape_validation() {
        assert!(Grid::from_rows(2, &[vec![0, 1], vec![1, 0]]).is_ok());
        assert!(Grid::from_rows(2, &[vec![0, 1]]).is_err());
        assert!(Grid::from_rows(2, &[vec![0, 1], vec![1]]).is_err());
    }

    #[test]
    fn test_place_then_clear_counts() {
        let mut grid = Grid::from_ascii(
            r"
            .###
            ....
            ....
            ....
            ",
        );
        grid.place(&unit_piece(), 0, 0);
        assert_eq!(grid.clear_lines(), 1);
    }
}
