use crate::{
    domain::{Board, BoardId, Card, CardId, ReorderItem},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

pub mod memory_storage;

/// Storage trait for persisting boards and their cards
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves a board record
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads a board record by id
    async fn load_board(&self, id: &BoardId) -> Result<Board>;

    /// Deletes a board and all of its cards
    async fn delete_board(&self, id: &BoardId) -> Result<()>;

    /// Saves a card under the given board
    async fn save_card(&self, board_id: &BoardId, card: &Card) -> Result<()>;

    /// Loads a card by id
    async fn load_card(&self, board_id: &BoardId, id: &CardId) -> Result<Card>;

    /// Loads all cards of a board
    async fn load_cards(&self, board_id: &BoardId) -> Result<Vec<Card>>;

    /// Deletes a card
    async fn delete_card(&self, board_id: &BoardId, id: &CardId) -> Result<()>;

    /// Applies a reorder payload to a board's cards.
    ///
    /// Items are walked in payload order and each referenced card receives the
    /// item's column plus a recomputed `order`: its position within the item's
    /// column group, counted from zero per column. Items referencing unknown
    /// card ids are skipped, with the column counter still advancing. An empty
    /// payload is a no-op.
    async fn apply_reorder(&self, board_id: &BoardId, items: &[ReorderItem]) -> Result<()>;

    /// Checks if the storage backend is initialized
    async fn is_initialized(&self) -> bool;
}
