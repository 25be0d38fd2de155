use crate::{grid::Grid, piece::Piece};

/// The ordered hand of up to 3 pieces available for placement.
///
/// The agent only ever reads hand state; refilling an exhausted hand is owned
/// by the external game process.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    slots: [Option<Piece>; 3],
}

impl Hand {
    pub const SLOT_COUNT: usize = 3;

    #[must_use]
    pub fn new(slots: [Option<Piece>; 3]) -> Self {
        Self { slots }
    }

    /// Returns the piece held in a slot, if any.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Piece> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Iterates over occupied slots as `(slot_index, piece)` in slot order.
    pub fn held(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (i, p)))
    }

    /// True when all three slots are empty (a refill boundary).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// One poll's read-only view of the game, built fresh from each snapshot and
/// discarded after a single search cycle.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    hand: Hand,
    combo: u32,
    combo_active: bool,
    score: u64,
}

impl GameState {
    #[must_use]
    pub fn new(grid: Grid, hand: Hand, combo: u32, combo_active: bool, score: u64) -> Self {
        Self {
            grid,
            hand,
            combo,
            combo_active,
            score,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// The combo counter as it stood before the move being considered.
    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub fn combo_active(&self) -> bool {
        self.combo_active
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }
}
