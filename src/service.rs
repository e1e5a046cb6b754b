use crate::{
    domain::{
        reorder::{build_reorder_payload, next_order, resolve_drag},
        Board, BoardId, Card, CardId, Column,
    },
    error::Result,
    storage::Storage,
};
use serde::Deserialize;

/// A completed drag gesture, as delivered by the transport layer.
///
/// `over_id` carries the drop target (a column's external name or a card id)
/// and is absent when the drag was released outside any valid target.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEndEvent {
    pub active_id: String,
    pub over_id: Option<String>,
}

impl DragEndEvent {
    pub fn new(active_id: impl Into<String>, over_id: Option<String>) -> Self {
        Self {
            active_id: active_id.into(),
            over_id,
        }
    }

    /// Returns the normalized `(active, over)` id pair.
    ///
    /// Ids are trimmed; a missing or blank id means there is nothing to
    /// resolve.
    pub fn targets(&self) -> Option<(&str, &str)> {
        let active = normalized_id(&self.active_id)?;
        let over = normalized_id(self.over_id.as_deref()?)?;
        Some((active, over))
    }
}

fn normalized_id(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Board operations over a storage backend.
///
/// Ties the pure ordering engine to persistence: drag-end events are resolved
/// against the stored card snapshot and shipped back as a reorder payload.
pub struct BoardService<S: Storage> {
    storage: S,
}

impl<S: Storage> BoardService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the underlying storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates a new board
    pub async fn create_board(&self, id: BoardId, name: String) -> Result<Board> {
        let board = Board::new(id, name);
        self.storage.save_board(&board).await?;
        Ok(board)
    }

    /// Renames a board
    pub async fn rename_board(&self, id: &BoardId, name: String) -> Result<Board> {
        let mut board = self.storage.load_board(id).await?;
        board.rename(name);
        self.storage.save_board(&board).await?;
        Ok(board)
    }

    /// Deletes a board together with its cards
    pub async fn delete_board(&self, id: &BoardId) -> Result<()> {
        self.storage.delete_board(id).await
    }

    /// Loads a board and its cards, sorted by column name and order
    pub async fn get_board_with_cards(&self, id: &BoardId) -> Result<(Board, Vec<Card>)> {
        let board = self.storage.load_board(id).await?;
        let mut cards = self.storage.load_cards(id).await?;
        cards.sort_by(|a, b| {
            a.column
                .as_str()
                .cmp(b.column.as_str())
                .then(a.order.cmp(&b.order))
        });
        Ok((board, cards))
    }

    /// Creates a card at the end of the given column
    pub async fn create_card(
        &self,
        board_id: &BoardId,
        id: CardId,
        column: Column,
        title: String,
        description: Option<String>,
    ) -> Result<Card> {
        let cards = self.storage.load_cards(board_id).await?;

        let mut card = Card::new(id, title, column, next_order(&cards, column));
        card.description = description;

        self.storage.save_card(board_id, &card).await?;
        Ok(card)
    }

    /// Updates a card's title and description
    pub async fn update_card(
        &self,
        board_id: &BoardId,
        id: &CardId,
        title: String,
        description: Option<String>,
    ) -> Result<Card> {
        let mut card = self.storage.load_card(board_id, id).await?;
        card.set_title(title);
        card.set_description(description);

        self.storage.save_card(board_id, &card).await?;
        Ok(card)
    }

    /// Deletes a card.
    ///
    /// Orders in the card's column are left gapped until the next reorder
    /// pass renormalizes them.
    pub async fn delete_card(&self, board_id: &BoardId, id: &CardId) -> Result<()> {
        self.storage.delete_card(board_id, id).await
    }

    /// Resolves a drag-end event against the stored cards and persists the
    /// outcome.
    ///
    /// Returns `Ok(None)` without touching storage when the event resolves to
    /// a no-op, so callers can skip redundant writes.
    pub async fn handle_drag_end(
        &self,
        board_id: &BoardId,
        event: &DragEndEvent,
    ) -> Result<Option<Vec<Card>>> {
        let Some((active_id, over_id)) = event.targets() else {
            tracing::debug!("Drag on board {} released outside any target", board_id);
            return Ok(None);
        };

        let cards = self.storage.load_cards(board_id).await?;

        match resolve_drag(&cards, active_id, over_id) {
            None => {
                tracing::debug!(
                    "Drag of {} over {} on board {} resolved to a no-op",
                    active_id,
                    over_id,
                    board_id
                );
                Ok(None)
            }
            Some(next) => {
                let payload = build_reorder_payload(&next);
                self.storage.apply_reorder(board_id, &payload).await?;
                tracing::debug!(
                    "Persisted reorder of {} cards on board {}",
                    payload.len(),
                    board_id
                );
                Ok(Some(next))
            }
        }
    }
}
