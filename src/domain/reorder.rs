use crate::domain::card::{Card, CardId, Column};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Rebuilds contiguous per-column card orders.
///
/// Cards are grouped by column following the canonical board sequence and
/// sorted by their current `order` within each group (stable, so cards with
/// equal orders keep their input sequence). Each group is then reindexed from
/// zero. The input is never mutated.
///
/// # Examples
/// ```
/// use flowdeck_core::domain::card::{Card, CardId, Column};
/// use flowdeck_core::domain::reorder::normalize_orders;
///
/// let cards = vec![
///     Card::new(CardId::new("a"), "A".to_string(), Column::Todo, 7),
///     Card::new(CardId::new("b"), "B".to_string(), Column::Todo, 2),
/// ];
///
/// let next = normalize_orders(&cards);
/// assert_eq!(next[0].id.as_str(), "b");
/// assert_eq!(next[0].order, 0);
/// assert_eq!(next[1].order, 1);
/// ```
pub fn normalize_orders(cards: &[Card]) -> Vec<Card> {
    let mut next = Vec::with_capacity(cards.len());

    for column in Column::ALL {
        let mut group: Vec<&Card> = cards.iter().filter(|c| c.column == column).collect();
        group.sort_by_key(|c| c.order);

        for (index, card) in group.into_iter().enumerate() {
            let mut card = card.clone();
            card.order = index as u32;
            next.push(card);
        }
    }

    next
}

/// Computes the append position for a new card in a column.
///
/// Cards are created at the end of their column: one past the highest current
/// order, or zero when the column is empty.
pub fn next_order(cards: &[Card], column: Column) -> u32 {
    cards
        .iter()
        .filter(|c| c.column == column)
        .map(|c| c.order + 1)
        .max()
        .unwrap_or(0)
}

/// Minimal wire representation of one card's placement after a reorder.
///
/// The receiving side recomputes each card's order from the item's position
/// within its column group in the payload, so the payload carries no explicit
/// order field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItem {
    pub card_id: CardId,
    pub column: Column,
}

/// Derives the reorder payload for a card list.
///
/// Items are grouped by column, columns ordered by descending external name
/// (a string ordering, deliberately not the board sequence), with ascending
/// `order` within each column. The secondary sort is what re-establishes the
/// target ordering when the receiver reindexes each column group by payload
/// position.
pub fn build_reorder_payload(cards: &[Card]) -> Vec<ReorderItem> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by(|a, b| {
        b.column
            .as_str()
            .cmp(a.column.as_str())
            .then(a.order.cmp(&b.order))
    });

    sorted
        .into_iter()
        .map(|c| ReorderItem {
            card_id: c.id.clone(),
            column: c.column,
        })
        .collect()
}

/// Resolves a completed drag gesture into the next card list.
///
/// `over_id` is either a column's external name (the card was dropped on the
/// column itself) or another card's id. Returns `None` when the drag changes
/// nothing: unknown ids, a drop on itself, or a same-column drop at the card's
/// current position. Callers use `None` to skip redundant persistence writes.
///
/// On a resolved move only the dragged card's column and the source and target
/// columns' orders change; every other card keeps its field values.
pub fn resolve_drag(cards: &[Card], active_id: &str, over_id: &str) -> Option<Vec<Card>> {
    if active_id == over_id {
        return None;
    }

    let active = cards.iter().find(|c| c.id.as_str() == active_id)?;

    let over_column = Column::from_str(over_id).ok();
    let over_card = match over_column {
        Some(_) => None,
        None => cards.iter().find(|c| c.id.as_str() == over_id),
    };

    let target_column = match (over_column, over_card) {
        (Some(column), _) => column,
        (None, Some(card)) => card.column,
        (None, None) => return None,
    };

    if target_column == active.column {
        let ordered = ordered_ids(cards, target_column);
        let from = ordered.iter().position(|id| id.as_str() == active_id)?;
        let to = match over_column {
            Some(_) => ordered.len() - 1,
            None => ordered.iter().position(|id| id.as_str() == over_id)?,
        };

        if from == to {
            return None;
        }

        let next = array_move(&ordered, from, to);
        return Some(apply_column_order(cards, target_column, &next));
    }

    let source_ordered: Vec<CardId> = ordered_ids(cards, active.column)
        .into_iter()
        .filter(|id| id.as_str() != active_id)
        .collect();
    let mut target_ordered: Vec<CardId> = ordered_ids(cards, target_column)
        .into_iter()
        .filter(|id| id.as_str() != active_id)
        .collect();

    let insert_index = match over_column {
        Some(_) => target_ordered.len(),
        None => target_ordered.iter().position(|id| id.as_str() == over_id)?,
    };
    target_ordered.insert(insert_index, active.id.clone());

    let moved: Vec<Card> = cards
        .iter()
        .map(|card| {
            if card.id.as_str() == active_id {
                let mut card = card.clone();
                card.column = target_column;
                card
            } else {
                card.clone()
            }
        })
        .collect();

    let with_source_order = apply_column_order(&moved, active.column, &source_ordered);
    Some(apply_column_order(
        &with_source_order,
        target_column,
        &target_ordered,
    ))
}

/// Ids of a column's cards, sorted by ascending order
fn ordered_ids(cards: &[Card], column: Column) -> Vec<CardId> {
    let mut group: Vec<&Card> = cards.iter().filter(|c| c.column == column).collect();
    group.sort_by_key(|c| c.order);
    group.into_iter().map(|c| c.id.clone()).collect()
}

/// Reassigns one column's orders to follow the given id sequence.
///
/// Cards in other columns, and cards of this column missing from the
/// sequence, pass through untouched. List positions are preserved.
fn apply_column_order(cards: &[Card], column: Column, ordered: &[CardId]) -> Vec<Card> {
    let order_by_id: HashMap<&str, u32> = ordered
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index as u32))
        .collect();

    cards
        .iter()
        .map(|card| {
            if card.column != column {
                return card.clone();
            }
            match order_by_id.get(card.id.as_str()) {
                Some(&order) => {
                    let mut card = card.clone();
                    card.order = order;
                    card
                }
                None => card.clone(),
            }
        })
        .collect()
}

/// Moves one element of the sequence, shifting the rest.
///
/// The element is removed first, so the insertion index is interpreted
/// against the shortened sequence.
fn array_move(ids: &[CardId], from: usize, to: usize) -> Vec<CardId> {
    let mut next = ids.to_vec();
    let id = next.remove(from);
    next.insert(to, id);
    next
}
