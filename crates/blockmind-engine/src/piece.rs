/// An immutable set of cell offsets describing one piece shape.
///
/// Offsets are normalized so the minimum x and minimum y are zero, and kept
/// sorted so two pieces with the same geometry compare equal regardless of the
/// order the snapshot listed their cells in. The shape catalog itself is owned
/// by the external game process; the agent only ever sees geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    cells: Vec<(usize, usize)>,
}

impl Piece {
    /// Creates a piece from raw cell offsets, normalizing to the origin.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    #[must_use]
    pub fn new(cells: &[(i64, i64)]) -> Self {
        assert!(!cells.is_empty(), "a piece must have at least one cell");
        let min_x = cells.iter().map(|&(x, _)| x).min().unwrap();
        let min_y = cells.iter().map(|&(_, y)| y).min().unwrap();
        let mut cells: Vec<(usize, usize)> = cells
            .iter()
            .map(|&(x, y)| {
                (
                    usize::try_from(x - min_x).unwrap(),
                    usize::try_from(y - min_y).unwrap(),
                )
            })
            .collect();
        cells.sort_unstable();
        cells.dedup();
        Self { cells }
    }

    /// Returns the normalized cell offsets.
    #[must_use]
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Returns the number of cells in the piece.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width of the bounding box in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        1 + self.cells.iter().map(|&(x, _)| x).max().unwrap()
    }

    /// Height of the bounding box in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        1 + self.cells.iter().map(|&(_, y)| y).max().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_to_origin() {
        let piece = Piece::new(&[(2, 3), (3, 3), (2, 4)]);
        assert_eq!(piece.cells(), &[(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_geometry_equal_regardless_of_order() {
        let a = Piece::new(&[(0, 0), (1, 0), (1, 1)]);
        let b = Piece::new(&[(1, 1), (0, 0), (1, 0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounding_box() {
        let piece = Piece::new(&[(0, 0), (1, 0), (2, 0), (2, 1)]);
        assert_eq!(piece.width(), 3);
        assert_eq!(piece.height(), 2);
        assert_eq!(piece.len(), 4);
    }
}
