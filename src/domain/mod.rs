pub mod board;
pub mod card;
pub mod reorder;

pub use board::{Board, BoardId};
pub use card::{Card, CardId, Column};
pub use reorder::{
    build_reorder_payload, next_order, normalize_orders, resolve_drag, ReorderItem,
};
