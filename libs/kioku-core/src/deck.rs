//! Deck container, merging, and summary metadata.

use crate::types::{AnswerCounts, Card};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// A deck of flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub cards: Vec<Card>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            cards: Vec::new(),
        }
    }

    /// Look up a card by id.
    pub fn card(&self, id: Uuid) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Look up a card by id for mutation (e.g. to record an answer).
    pub fn card_mut(&mut self, id: Uuid) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    /// Merge another deck into this one.
    ///
    /// Cards are unioned by `(front, back)` text: a match keeps this deck's
    /// card, appends the other card's answer histories side by side, and
    /// stays enabled if either copy was enabled. Unmatched cards are added
    /// as-is.
    pub fn merge(&mut self, other: Deck) {
        let mut by_text: HashMap<(String, String), usize> = self
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| ((card.front.clone(), card.back.clone()), index))
            .collect();
        let mut matched = 0usize;
        let mut added = 0usize;
        for card in other.cards {
            match by_text.get(&(card.front.clone(), card.back.clone())) {
                Some(&index) => {
                    let existing = &mut self.cards[index];
                    existing.enabled = existing.enabled || card.enabled;
                    existing.front_history.extend(card.front_history);
                    existing.back_history.extend(card.back_history);
                    matched += 1;
                }
                None => {
                    by_text.insert((card.front.clone(), card.back.clone()), self.cards.len());
                    self.cards.push(card);
                    added += 1;
                }
            }
        }
        tracing::debug!(deck = %self.id, matched, added, "merged deck");
    }

    /// Create a new deck by merging multiple decks.
    pub fn from_merge<I: IntoIterator<Item = Deck>>(decks: I) -> Self {
        let mut merged = Deck::new();
        for deck in decks {
            merged.merge(deck);
        }
        merged
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a deck for list views, kept separately from the card data so
/// deck lists load without the cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckMetadata {
    pub id: Uuid,
    pub name: String,
    pub card_count: usize,
    /// Deck-wide answer counts keyed by history window length.
    pub answer_counts: BTreeMap<usize, AnswerCounts>,
}

impl DeckMetadata {
    /// Summarize a deck, precomputing counts for the given window lengths.
    pub fn summarize(deck: &Deck, name: impl Into<String>, history_lengths: &[usize]) -> Self {
        Self {
            id: deck.id,
            name: name.into(),
            card_count: deck.cards.len(),
            answer_counts: summarize_answer_counts(&deck.cards, history_lengths),
        }
    }

    /// Answer counts for the given window length.
    ///
    /// A window larger than the largest precomputed one only adds slots no
    /// answer was recorded for, so those counts are extrapolated by growing
    /// `missing` by two slots per card and window step.
    pub fn answer_counts(&self, history_length: usize) -> AnswerCounts {
        if history_length == 0 {
            return AnswerCounts::default();
        }
        if let Some(counts) = self.answer_counts.get(&history_length) {
            return *counts;
        }
        match self.answer_counts.last_key_value() {
            Some((&max_length, max_counts)) if history_length > max_length => {
                let mut counts = *max_counts;
                counts.missing += (history_length - max_length) * self.card_count * 2;
                counts
            }
            _ => AnswerCounts::default(),
        }
    }
}

pub(crate) fn summarize_answer_counts(
    cards: &[Card],
    history_lengths: &[usize],
) -> BTreeMap<usize, AnswerCounts> {
    history_lengths
        .iter()
        .copied()
        .filter(|&history_length| history_length > 0)
        .map(|history_length| {
            let total = cards
                .iter()
                .map(|card| card.answer_counts(None, history_length))
                .sum();
            (history_length, total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardSide;
    use pretty_assertions::assert_eq;

    fn card(front: &str, back: &str, front_history: &[bool]) -> Card {
        let mut card = Card::new(front, back);
        card.front_history = front_history.to_vec();
        card
    }

    #[test]
    fn merge_unions_cards_by_text() {
        let mut deck = Deck::new();
        deck.cards.push(card("犬", "dog", &[true]));

        let mut other = Deck::new();
        let mut duplicate = card("犬", "dog", &[false]);
        duplicate.enabled = false;
        duplicate.back_history = vec![true];
        other.cards.push(duplicate);
        other.cards.push(card("猫", "cat", &[]));

        deck.merge(other);

        assert_eq!(deck.cards.len(), 2);
        let merged = &deck.cards[0];
        assert_eq!(merged.front_history, vec![true, false]);
        assert_eq!(merged.back_history, vec![true]);
        assert!(merged.enabled);
        assert_eq!(deck.cards[1].front, "猫");
    }

    #[test]
    fn merge_matches_duplicates_within_other() {
        let mut deck = Deck::new();
        let mut other = Deck::new();
        other.cards.push(card("犬", "dog", &[true]));
        other.cards.push(card("犬", "dog", &[false]));
        deck.merge(other);
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].front_history, vec![true, false]);
    }

    #[test]
    fn from_merge_of_nothing_is_empty() {
        let deck = Deck::from_merge([]);
        assert!(deck.cards.is_empty());
    }

    #[test]
    fn card_lookup_by_id() {
        let mut deck = Deck::new();
        deck.cards.push(card("犬", "dog", &[]));
        let id = deck.cards[0].id;
        assert_eq!(deck.card(id).map(|c| c.front.as_str()), Some("犬"));
        if let Some(found) = deck.card_mut(id) {
            found.record_answer(CardSide::Front, true);
        }
        assert_eq!(deck.cards[0].front_history, vec![true]);
        assert!(deck.card(Uuid::new_v4()).is_none());
    }

    #[test]
    fn metadata_precomputes_counts_per_window() {
        let mut deck = Deck::new();
        deck.cards.push(card("犬", "dog", &[true, false]));
        deck.cards.push(card("猫", "cat", &[true]));
        let metadata = DeckMetadata::summarize(&deck, "Animals", &[1, 2]);

        assert_eq!(metadata.card_count, 2);
        // window 1: one correct + one wrong front answer, both backs missing
        assert_eq!(
            metadata.answer_counts(1),
            AnswerCounts {
                correct: 1,
                wrong: 1,
                missing: 2
            }
        );
        // window 2: three front answers recorded, five slots empty
        assert_eq!(
            metadata.answer_counts(2),
            AnswerCounts {
                correct: 2,
                wrong: 1,
                missing: 5
            }
        );
    }

    #[test]
    fn metadata_extrapolates_beyond_largest_window() {
        let mut deck = Deck::new();
        deck.cards.push(card("犬", "dog", &[true, false]));
        deck.cards.push(card("猫", "cat", &[true]));
        let metadata = DeckMetadata::summarize(&deck, "Animals", &[2]);

        let extrapolated = metadata.answer_counts(5);
        let base = metadata.answer_counts(2);
        assert_eq!(extrapolated.correct, base.correct);
        assert_eq!(extrapolated.wrong, base.wrong);
        assert_eq!(extrapolated.missing, base.missing + 3 * 2 * 2);
    }

    #[test]
    fn metadata_without_precomputed_windows_is_empty() {
        let deck = Deck::new();
        let metadata = DeckMetadata::summarize(&deck, "Empty", &[]);
        assert_eq!(metadata.answer_counts(3), AnswerCounts::default());
        assert_eq!(metadata.answer_counts(0), AnswerCounts::default());
    }
}
