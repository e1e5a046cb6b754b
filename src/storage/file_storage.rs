use crate::{
    domain::{Board, BoardId, Card, CardId, Column, ReorderItem},
    error::{FlowdeckError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tokio::fs;

/// File-based storage implementation
///
/// Boards live under `.flowdeck/boards/<boardId>/`, each holding a
/// `board.json` record and one JSON file per card.
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const FLOWDECK_DIR: &'static str = ".flowdeck";
    const BOARDS_DIR: &'static str = "boards";
    const CARDS_DIR: &'static str = "cards";
    const BOARD_FILE: &'static str = "board.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::FLOWDECK_DIR),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn board_dir(&self, id: &BoardId) -> PathBuf {
        self.boards_dir().join(id.as_str())
    }

    fn board_file(&self, id: &BoardId) -> PathBuf {
        self.board_dir(id).join(Self::BOARD_FILE)
    }

    fn cards_dir(&self, id: &BoardId) -> PathBuf {
        self.board_dir(id).join(Self::CARDS_DIR)
    }

    fn card_file(&self, board_id: &BoardId, id: &CardId) -> PathBuf {
        self.cards_dir(board_id).join(format!("{}.json", id.as_str()))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        // Create .flowdeck directory structure
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;

        // Create .gitignore
        let gitignore_path = self.root_path.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(gitignore_path, "# Local caches\n*.tmp\n").await?;
        }

        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.board_dir(&board.id)).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(&board.id), json).await?;

        Ok(())
    }

    async fn load_board(&self, id: &BoardId) -> Result<Board> {
        let board_file = self.board_file(id);

        if !board_file.exists() {
            return Err(FlowdeckError::BoardNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&board_file).await?;
        let board: Board = serde_json::from_str(&contents)?;

        Ok(board)
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        let board_dir = self.board_dir(id);

        if !board_dir.exists() {
            return Err(FlowdeckError::BoardNotFound(id.to_string()));
        }

        // Removes the board record and its cards together
        fs::remove_dir_all(board_dir).await?;
        Ok(())
    }

    async fn save_card(&self, board_id: &BoardId, card: &Card) -> Result<()> {
        self.ensure_directory_exists(&self.cards_dir(board_id)).await?;

        let json = serde_json::to_string_pretty(card)?;
        fs::write(self.card_file(board_id, &card.id), json).await?;

        Ok(())
    }

    async fn load_card(&self, board_id: &BoardId, id: &CardId) -> Result<Card> {
        let file_path = self.card_file(board_id, id);

        if !file_path.exists() {
            return Err(FlowdeckError::CardNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let card: Card = serde_json::from_str(&contents)?;

        Ok(card)
    }

    async fn load_cards(&self, board_id: &BoardId) -> Result<Vec<Card>> {
        let cards_dir = self.cards_dir(board_id);

        if !cards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&cards_dir).await?;
        let mut cards: Vec<Card> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                let contents = fs::read_to_string(&path).await?;
                let card: Card = serde_json::from_str(&contents)?;
                cards.push(card);
            }
        }

        Ok(cards)
    }

    async fn delete_card(&self, board_id: &BoardId, id: &CardId) -> Result<()> {
        let file_path = self.card_file(board_id, id);

        if !file_path.exists() {
            return Err(FlowdeckError::CardNotFound(id.to_string()));
        }

        fs::remove_file(file_path).await?;
        Ok(())
    }

    async fn apply_reorder(&self, board_id: &BoardId, items: &[ReorderItem]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut order_by_column: HashMap<Column, u32> = HashMap::new();
        let mut updated: Vec<Card> = Vec::new();

        // Compute every update before writing any file
        for item in items {
            let counter = order_by_column.entry(item.column).or_insert(0);
            let order = *counter;
            *counter += 1;

            let file_path = self.card_file(board_id, &item.card_id);
            if !file_path.exists() {
                tracing::warn!(
                    "Skipping reorder item for unknown card {} on board {}",
                    item.card_id,
                    board_id
                );
                continue;
            }

            let contents = fs::read_to_string(&file_path).await?;
            let mut card: Card = serde_json::from_str(&contents)?;
            card.column = item.column;
            card.order = order;
            updated.push(card);
        }

        for card in &updated {
            let json = serde_json::to_string_pretty(card)?;
            fs::write(self.card_file(board_id, &card.id), json).await?;
        }

        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.boards_dir().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn board(id: &str, name: &str) -> Board {
        Board::new(BoardId::new(id), name.to_string())
    }

    fn card(id: &str, title: &str, column: Column, order: u32) -> Card {
        Card::new(CardId::new(id), title.to_string(), column, order)
    }

    #[tokio::test]
    async fn test_storage_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(!storage.is_initialized().await);

        storage.initialize().await.unwrap();

        assert!(storage.is_initialized().await);
        assert!(storage.boards_dir().exists());
    }

    #[tokio::test]
    async fn test_board_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();

        let loaded = storage.load_board(&board.id).await.unwrap();
        assert_eq!(loaded, board);
    }

    #[tokio::test]
    async fn test_load_missing_board() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let result = storage.load_board(&BoardId::new("nope")).await;
        assert!(matches!(result, Err(FlowdeckError::BoardNotFound(_))));
    }

    #[tokio::test]
    async fn test_card_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();

        let card = card("c1", "Write docs", Column::Todo, 0);
        storage.save_card(&board.id, &card).await.unwrap();

        let loaded = storage.load_card(&board.id, &card.id).await.unwrap();
        assert_eq!(loaded, card);

        let cards = storage.load_cards(&board.id).await.unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[tokio::test]
    async fn test_load_cards_for_empty_board() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();

        let cards = storage.load_cards(&board.id).await.unwrap();
        assert!(cards.is_empty());
    }

    #[tokio::test]
    async fn test_delete_card() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();

        let card = card("c1", "Write docs", Column::Todo, 0);
        storage.save_card(&board.id, &card).await.unwrap();
        storage.delete_card(&board.id, &card.id).await.unwrap();

        let result = storage.load_card(&board.id, &card.id).await;
        assert!(matches!(result, Err(FlowdeckError::CardNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_board_removes_cards() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();
        storage
            .save_card(&board.id, &card("c1", "Write docs", Column::Todo, 0))
            .await
            .unwrap();

        storage.delete_board(&board.id).await.unwrap();

        let result = storage.load_board(&board.id).await;
        assert!(matches!(result, Err(FlowdeckError::BoardNotFound(_))));
        assert!(storage.load_cards(&board.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_apply_reorder_recomputes_orders_per_column() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();

        storage
            .save_card(&board.id, &card("a", "A", Column::Todo, 0))
            .await
            .unwrap();
        storage
            .save_card(&board.id, &card("b", "B", Column::Todo, 1))
            .await
            .unwrap();
        storage
            .save_card(&board.id, &card("c", "C", Column::Done, 0))
            .await
            .unwrap();

        // "b" moves to done, ahead of "c"
        let items = vec![
            ReorderItem {
                card_id: CardId::new("a"),
                column: Column::Todo,
            },
            ReorderItem {
                card_id: CardId::new("b"),
                column: Column::Done,
            },
            ReorderItem {
                card_id: CardId::new("c"),
                column: Column::Done,
            },
        ];
        storage.apply_reorder(&board.id, &items).await.unwrap();

        let a = storage.load_card(&board.id, &CardId::new("a")).await.unwrap();
        let b = storage.load_card(&board.id, &CardId::new("b")).await.unwrap();
        let c = storage.load_card(&board.id, &CardId::new("c")).await.unwrap();

        assert_eq!((a.column, a.order), (Column::Todo, 0));
        assert_eq!((b.column, b.order), (Column::Done, 0));
        assert_eq!((c.column, c.order), (Column::Done, 1));
    }

    #[tokio::test]
    async fn test_apply_reorder_skips_unknown_cards() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();
        storage
            .save_card(&board.id, &card("a", "A", Column::Todo, 0))
            .await
            .unwrap();

        // The unknown id still occupies position 0 of the todo group
        let items = vec![
            ReorderItem {
                card_id: CardId::new("ghost"),
                column: Column::Todo,
            },
            ReorderItem {
                card_id: CardId::new("a"),
                column: Column::Todo,
            },
        ];
        storage.apply_reorder(&board.id, &items).await.unwrap();

        let a = storage.load_card(&board.id, &CardId::new("a")).await.unwrap();
        assert_eq!(a.order, 1);
    }

    #[tokio::test]
    async fn test_apply_reorder_empty_payload() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let board = board("b1", "Sprint 12");
        storage.save_board(&board).await.unwrap();

        storage.apply_reorder(&board.id, &[]).await.unwrap();
    }
}
