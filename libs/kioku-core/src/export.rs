//! Serializable envelope for sharing and backing up decks.
//!
//! The storage layer decides where the JSON goes; these models only pin the
//! shape so exports written by one client import cleanly in another.

use crate::deck::{summarize_answer_counts, Deck, DeckMetadata};
use crate::types::Card;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deck exported for sharing or backup, carrying its display name next to
/// the card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedDeck {
    pub id: Uuid,
    pub name: String,
    pub cards: Vec<Card>,
}

impl ExportedDeck {
    /// Pair deck data with its display name.
    pub fn from_deck(deck: &Deck, name: impl Into<String>) -> Self {
        Self {
            id: deck.id,
            name: name.into(),
            cards: deck.cards.clone(),
        }
    }

    /// Recover the deck data.
    pub fn into_deck(self) -> Deck {
        Deck {
            id: self.id,
            cards: self.cards,
        }
    }

    /// Metadata for the imported deck, summarized for the given windows.
    pub fn to_metadata(&self, history_lengths: &[usize]) -> DeckMetadata {
        DeckMetadata {
            id: self.id,
            name: self.name.clone(),
            card_count: self.cards.len(),
            answer_counts: summarize_answer_counts(&self.cards, history_lengths),
        }
    }
}

/// A collection of exported decks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckExport {
    #[serde(default)]
    pub decks: Vec<ExportedDeck>,
}
