use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public identifier for a board, assigned externally
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(String);

impl BoardId {
    /// Creates a BoardId from an externally assigned id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A kanban board
///
/// Cards are stored separately and keyed by the board id; the board record
/// itself carries only identity and display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board
    pub fn new(id: BoardId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Renames the board
    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(BoardId::new("b1"), "Sprint 12".to_string());

        assert_eq!(board.id.as_str(), "b1");
        assert_eq!(board.name, "Sprint 12");
        assert_eq!(board.created_at, board.updated_at);
    }

    #[test]
    fn test_rename_updates_updated_at() {
        let mut board = Board::new(BoardId::new("b1"), "Sprint 12".to_string());
        let initial_updated_at = board.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        board.rename("Sprint 13".to_string());

        assert_eq!(board.name, "Sprint 13");
        assert!(board.updated_at > initial_updated_at);
    }
}
