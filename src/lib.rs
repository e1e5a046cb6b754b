//! # Flowdeck Core
//!
//! Core board logic and card ordering for Flowdeck kanban boards.
//!
//! This crate provides the board and card domain types, the pure ordering
//! engine that resolves drag-and-drop gestures into consistent per-column
//! orders, and the storage boundary used to persist the results, without any
//! dependency on specific UI implementations or transports.

pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardId},
    card::{Card, CardId, Column},
    reorder::{build_reorder_payload, normalize_orders, resolve_drag, ReorderItem},
};
pub use error::{FlowdeckError, Result};
pub use service::{BoardService, DragEndEvent};
pub use storage::Storage;
