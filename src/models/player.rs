//! Player data structure.

use serde::{Deserialize, Serialize};

/// Identifier for a player: 1-based position in the roster.
pub type PlayerId = u32;

/// A player in the round robin. Immutable once the roster is set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a player from a roster position (0-based) and a raw name.
    /// A blank name is replaced by the placeholder for that position.
    pub fn from_position(index: usize, name: &str) -> Self {
        let id = index as PlayerId + 1;
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            Self::placeholder_name(id)
        } else {
            trimmed.to_string()
        };
        Self { id, name }
    }

    /// Default label for a player slot without a name.
    pub fn placeholder_name(id: PlayerId) -> String {
        format!("Player {}", id)
    }
}
