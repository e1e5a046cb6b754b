use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A column on the kanban board.
///
/// The set is closed and the variant order below is the canonical board
/// sequence used when normalizing card orders. Wire payloads sort columns by
/// their external name instead, which is a different ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Todo,
    InProgress,
    Done,
}

impl Column {
    /// Canonical board sequence, left to right
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    /// Returns the external (wire) name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for Column {
    type Err = crate::error::FlowdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(crate::error::FlowdeckError::UnknownColumn(s.to_string())),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unique identifier for a card
///
/// Ids are opaque strings assigned outside this crate, so no format is
/// enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Creates a CardId from an externally assigned id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card on the board
///
/// `order` is a zero-based position that is only meaningful relative to other
/// cards in the same column. The ordering engine mutates `column` and `order`
/// exclusively; titles, descriptions, and timestamps belong to edit
/// operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub description: Option<String>,
    pub column: Column,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a new card at the given column position
    pub fn new(id: CardId, title: String, column: Column, order: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            column,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Sets the description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }
}
