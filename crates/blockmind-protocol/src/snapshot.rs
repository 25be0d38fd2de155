//! Ingesting the snapshot the game process publishes.
//!
//! The wire schema mirrors the external engine's serializer. Parsing is
//! deliberately tolerant: absent sections take defaults, and a missing file, a
//! parse failure, a `game_over` flag, or `any_move_available = false` all
//! collapse into the same outcome - "no playable state".

use std::path::Path;

use blockmind_engine::{GameState, Grid, Hand, Piece};
use serde::Deserialize;

use crate::atomic::read_json_opt;

#[derive(Debug, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub meta: SnapshotMeta,
    pub board: SnapshotBoard,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub hand: Vec<HandEntry>,
    #[serde(default)]
    pub combo: ComboSection,
    #[serde(default)]
    pub status: StatusSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotMeta {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub timestamp_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotBoard {
    pub size: usize,
    pub grid: Vec<Vec<u8>>,
}

#[derive(Debug, Deserialize)]
pub struct HandEntry {
    pub slot: usize,
    #[serde(default = "default_true")]
    pub empty: bool,
    #[serde(default)]
    pub piece: Option<PieceGeometry>,
}

/// Piece geometry as published by the game process. The name and bounding box
/// are informational; only the cell offsets matter to the agent.
#[derive(Debug, Deserialize)]
pub struct PieceGeometry {
    pub cells: Vec<(i64, i64)>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComboSection {
    #[serde(default)]
    pub combo: u32,
    #[serde(default)]
    pub combo_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatusSection {
    #[serde(default)]
    pub game_over: bool,
    #[serde(default = "default_true")]
    pub any_move_available: bool,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            game_over: false,
            any_move_available: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Snapshot {
    /// Converts the wire snapshot into a [`GameState`].
    ///
    /// Returns `None` for terminal snapshots and for grids that do not match
    /// the declared size; hand entries with out-of-range slot indices are
    /// dropped rather than rejected.
    #[must_use]
    pub fn into_game_state(self) -> Option<GameState> {
        if self.status.game_over || !self.status.any_move_available {
            return None;
        }

        let grid = Grid::from_rows(self.board.size, &self.board.grid).ok()?;

        let mut slots: [Option<Piece>; Hand::SLOT_COUNT] = [None, None, None];
        for entry in self.hand {
            if entry.slot >= Hand::SLOT_COUNT || entry.empty {
                continue;
            }
            if let Some(geometry) = entry.piece
                && !geometry.cells.is_empty()
            {
                slots[entry.slot] = Some(Piece::new(&geometry.cells));
            }
        }

        Some(GameState::new(
            grid,
            Hand::new(slots),
            self.combo.combo,
            self.combo.combo_active,
            self.score,
        ))
    }
}

/// Polls the snapshot file and returns a playable state, if there is one.
#[must_use]
pub fn load_game_state(path: &Path) -> Option<GameState> {
    read_json_opt::<Snapshot>(path)?.into_game_state()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_json() -> serde_json::Value {
        serde_json::json!({
            "meta": { "version": 2, "timestamp_ms": 1_700_000_000_000_u64 },
            "board": {
                "size": 4,
                "grid": [
                    [1, 0, 0, 0],
                    [0, 0, 0, 0],
                    [0, 0, 0, 0],
                    [0, 0, 0, 0]
                ]
            },
            "score": 42,
            "hand": [
                { "slot": 0, "empty": false, "piece": { "name": "P1", "cells": [[0, 0], [1, 0]], "w": 2, "h": 1 } },
                { "slot": 1, "empty": true, "piece": null },
                { "slot": 2, "empty": false, "piece": { "cells": [[0, 0]] } }
            ],
            "combo": { "combo": 3, "combo_active": true },
            "status": { "game_over": false, "any_move_available": true }
        })
    }

    #[test]
    fn test_parses_playable_snapshot() {
        let snapshot: Snapshot = serde_json::from_value(snapshot_json()).unwrap();
        let state = snapshot.into_game_state().unwrap();

        assert_eq!(state.grid().size(), 4);
        assert!(state.grid().cell(0, 0));
        assert_eq!(state.combo(), 3);
        assert!(state.combo_active());
        assert_eq!(state.score(), 42);

        assert_eq!(state.hand().slot(0).unwrap().len(), 2);
        assert!(state.hand().slot(1).is_none());
        assert_eq!(state.hand().slot(2).unwrap().len(), 1);
    }

    #[test]
    fn test_game_over_is_not_playable() {
        let mut json = snapshot_json();
        json["status"]["game_over"] = true.into();
        let snapshot: Snapshot = serde_json::from_value(json).unwrap();
        assert!(snapshot.into_game_state().is_none());
    }

    #[test]
    fn test_no_available_move_is_not_playable() {
        let mut json = snapshot_json();
        json["status"]["any_move_available"] = false.into();
        let snapshot: Snapshot = serde_json::from_value(json).unwrap();
        assert!(snapshot.into_game_state().is_none());
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let json = serde_json::json!({
            "board": { "size": 2, "grid": [[0, 0], [0, 0]] }
        });
        let snapshot: Snapshot = serde_json::from_value(json).unwrap();
        let state = snapshot.into_game_state().unwrap();
        assert_eq!(state.combo(), 0);
        assert!(state.hand().is_empty());
    }

    #[test]
    fn test_mismatched_grid_is_rejected() {
        let mut json = snapshot_json();
        json["board"]["grid"] = serde_json::json!([[1, 0], [0, 0]]);
        let snapshot: Snapshot = serde_json::from_value(json).unwrap();
        assert!(snapshot.into_game_state().is_none());
    }
}
