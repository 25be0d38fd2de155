//! Restart requests published at generation boundaries.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::atomic::{ProtocolError, write_json_atomic};

/// A single boolean flag; the game process starts a fresh game on seeing it
/// and deletes the file after handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartRequest {
    pub restart: bool,
}

/// Asks the game process for a fresh game instance and snapshot republish.
pub fn publish_restart(path: &Path) -> Result<(), ProtocolError> {
    write_json_atomic(path, &RestartRequest { restart: true })
}
