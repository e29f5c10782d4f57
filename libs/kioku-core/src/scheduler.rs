//! Selection of the next card and side to study.

use crate::deck::Deck;
use crate::error::{Result, StudyError};
use crate::types::{Card, CardSide, Score, StudyConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

/// Pick the card and side to study next.
///
/// Every enabled, non-excluded card competes with both of its sides; the
/// sides with the lowest score (fewest window samples, then fewest correct
/// answers) survive and one of them is picked uniformly at random. If the
/// exclusion leaves no candidate the whole deck is reconsidered, so a small
/// deck keeps cycling instead of stalling. A fixed `seed` reproduces the
/// same pick.
pub fn select<'a>(
    deck: &'a Deck,
    history_length: usize,
    exclude: &HashSet<Uuid>,
    seed: Option<u64>,
) -> Result<(&'a Card, CardSide)> {
    let included: Vec<&Card> = deck
        .cards
        .iter()
        .filter(|card| !exclude.contains(&card.id))
        .collect();
    let mut candidates = minimal_score_candidates(&included, history_length);
    if candidates.is_empty() && !exclude.is_empty() {
        tracing::debug!(deck = %deck.id, "exclusion left no candidates, reconsidering whole deck");
        let all: Vec<&Card> = deck.cards.iter().collect();
        candidates = minimal_score_candidates(&all, history_length);
    }
    if candidates.is_empty() {
        return Err(StudyError::NoStudyableCards);
    }
    tracing::debug!(deck = %deck.id, candidates = candidates.len(), "picking next card");
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::thread_rng().gen()),
    };
    Ok(candidates[rng.gen_range(0..candidates.len())])
}

/// All `(card, side)` pairs sharing the minimal score.
fn minimal_score_candidates<'a>(
    cards: &[&'a Card],
    history_length: usize,
) -> Vec<(&'a Card, CardSide)> {
    let mut candidates: Vec<(&'a Card, CardSide)> = Vec::new();
    let mut minimum: Option<Score> = None;
    for &card in cards {
        if !card.enabled {
            continue;
        }
        for side in CardSide::BOTH {
            let score = card.score(side, history_length);
            match minimum {
                Some(min) if score > min => {}
                Some(min) if score == min => candidates.push((card, side)),
                _ => {
                    candidates.clear();
                    candidates.push((card, side));
                    minimum = Some(score);
                }
            }
        }
    }
    candidates
}

/// Bounded FIFO of recently shown cards.
///
/// Callers feed this back into [`select`] as the exclusion set so the same
/// card is not asked again right away. Keeping it is caller policy, not a
/// scheduler invariant.
#[derive(Debug, Clone)]
pub struct RecentQueue {
    capacity: usize,
    ids: VecDeque<Uuid>,
}

impl RecentQueue {
    /// Queue sized per the study configuration.
    pub fn from_config(config: &StudyConfig) -> Self {
        Self::new(config.recent_capacity)
    }

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ids: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a shown card, evicting the oldest entry when full.
    pub fn push(&mut self, id: Uuid) {
        if self.capacity == 0 {
            return;
        }
        if self.ids.len() == self.capacity {
            self.ids.pop_front();
        }
        self.ids.push_back(id);
    }

    /// Exclusion set for the next [`select`] call.
    pub fn to_exclusion_set(&self) -> HashSet<Uuid> {
        self.ids.iter().copied().collect()
    }
}
