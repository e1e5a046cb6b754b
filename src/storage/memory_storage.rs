use crate::{
    domain::{Board, BoardId, Card, CardId, Column, ReorderItem},
    error::{FlowdeckError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory storage implementation
///
/// Backs tests and embedders that do not persist between runs. A card can
/// only be saved under a board that already exists, since there is no
/// directory skeleton to create records implicitly.
#[derive(Default)]
pub struct MemoryStorage {
    boards: RwLock<HashMap<String, BoardEntry>>,
}

struct BoardEntry {
    board: Board,
    cards: HashMap<String, Card>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        let mut boards = self.boards.write().await;
        match boards.get_mut(board.id.as_str()) {
            Some(entry) => entry.board = board.clone(),
            None => {
                boards.insert(
                    board.id.as_str().to_string(),
                    BoardEntry {
                        board: board.clone(),
                        cards: HashMap::new(),
                    },
                );
            }
        }
        Ok(())
    }

    async fn load_board(&self, id: &BoardId) -> Result<Board> {
        let boards = self.boards.read().await;
        boards
            .get(id.as_str())
            .map(|entry| entry.board.clone())
            .ok_or_else(|| FlowdeckError::BoardNotFound(id.to_string()))
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        let mut boards = self.boards.write().await;
        boards
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| FlowdeckError::BoardNotFound(id.to_string()))
    }

    async fn save_card(&self, board_id: &BoardId, card: &Card) -> Result<()> {
        let mut boards = self.boards.write().await;
        let entry = boards
            .get_mut(board_id.as_str())
            .ok_or_else(|| FlowdeckError::BoardNotFound(board_id.to_string()))?;

        entry.cards.insert(card.id.as_str().to_string(), card.clone());
        Ok(())
    }

    async fn load_card(&self, board_id: &BoardId, id: &CardId) -> Result<Card> {
        let boards = self.boards.read().await;
        boards
            .get(board_id.as_str())
            .and_then(|entry| entry.cards.get(id.as_str()))
            .cloned()
            .ok_or_else(|| FlowdeckError::CardNotFound(id.to_string()))
    }

    async fn load_cards(&self, board_id: &BoardId) -> Result<Vec<Card>> {
        let boards = self.boards.read().await;
        Ok(boards
            .get(board_id.as_str())
            .map(|entry| entry.cards.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_card(&self, board_id: &BoardId, id: &CardId) -> Result<()> {
        let mut boards = self.boards.write().await;
        let entry = boards
            .get_mut(board_id.as_str())
            .ok_or_else(|| FlowdeckError::BoardNotFound(board_id.to_string()))?;

        entry
            .cards
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| FlowdeckError::CardNotFound(id.to_string()))
    }

    async fn apply_reorder(&self, board_id: &BoardId, items: &[ReorderItem]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut boards = self.boards.write().await;
        let Some(entry) = boards.get_mut(board_id.as_str()) else {
            tracing::warn!("Dropping reorder payload for unknown board {}", board_id);
            return Ok(());
        };

        let mut order_by_column: HashMap<Column, u32> = HashMap::new();

        for item in items {
            let counter = order_by_column.entry(item.column).or_insert(0);
            let order = *counter;
            *counter += 1;

            match entry.cards.get_mut(item.card_id.as_str()) {
                Some(card) => {
                    card.column = item.column;
                    card.order = order;
                }
                None => {
                    tracing::warn!(
                        "Skipping reorder item for unknown card {} on board {}",
                        item.card_id,
                        board_id
                    );
                }
            }
        }

        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        true
    }
}
