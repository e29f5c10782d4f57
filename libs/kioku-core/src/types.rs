//! Core types for the study engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSide {
    Front,
    Back,
}

impl CardSide {
    /// Both sides, front first.
    pub const BOTH: [CardSide; 2] = [CardSide::Front, CardSide::Back];

    /// Get the opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Counts of answers over a history window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCounts {
    /// Number of correct answers.
    pub correct: usize,
    /// Number of wrong answers.
    pub wrong: usize,
    /// Number of window slots with no recorded answer yet.
    pub missing: usize,
}

impl AnswerCounts {
    /// Total number of answers, including missing ones.
    pub fn total(&self) -> usize {
        self.correct + self.wrong + self.missing
    }
}

impl std::ops::Add for AnswerCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            correct: self.correct + other.correct,
            wrong: self.wrong + other.wrong,
            missing: self.missing + other.missing,
        }
    }
}

impl std::iter::Sum for AnswerCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, counts| acc + counts)
    }
}

/// Study priority of one card side.
///
/// Compares field by field: fewer window samples first, then fewer correct
/// answers. Lower means "needs more study".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    /// Answers actually present in the window.
    pub samples: usize,
    /// Correct answers in the window.
    pub correct: usize,
}

/// A flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    /// Text on the front side (e.g. the term in the foreign language).
    pub front: String,
    /// Text on the back side (e.g. the term in the native language).
    pub back: String,
    /// Whether the card takes part in study sessions.
    pub enabled: bool,
    /// Answers given when asked for the front, most recent last.
    #[serde(default)]
    pub front_history: Vec<bool>,
    /// Answers given when asked for the back, most recent last.
    #[serde(default)]
    pub back_history: Vec<bool>,
}

impl Card {
    /// Create an enabled card with empty histories.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            enabled: true,
            front_history: Vec::new(),
            back_history: Vec::new(),
        }
    }

    /// Text on the given side.
    pub fn side_text(&self, side: CardSide) -> &str {
        match side {
            CardSide::Front => &self.front,
            CardSide::Back => &self.back,
        }
    }

    /// Answer history of the given side.
    pub fn history(&self, side: CardSide) -> &[bool] {
        match side {
            CardSide::Front => &self.front_history,
            CardSide::Back => &self.back_history,
        }
    }

    /// Append an answer to the given side's history. Never reorders or
    /// drops earlier entries.
    pub fn record_answer(&mut self, side: CardSide, correct: bool) {
        match side {
            CardSide::Front => self.front_history.push(correct),
            CardSide::Back => self.back_history.push(correct),
        }
    }

    /// Replace the card text, resetting both answer histories.
    pub fn set_text(&mut self, front: impl Into<String>, back: impl Into<String>) {
        self.front = front.into();
        self.back = back.into();
        self.clear_history();
    }

    /// Reset both answer histories. Recorded answers only apply to the text
    /// they were given for, so edits must call this.
    pub fn clear_history(&mut self) {
        self.front_history.clear();
        self.back_history.clear();
    }

    /// Answer counts over the last `history_length` entries of one side, or
    /// of both sides when `side` is `None`.
    pub fn answer_counts(&self, side: Option<CardSide>, history_length: usize) -> AnswerCounts {
        let mut counts = AnswerCounts::default();
        if history_length == 0 {
            return counts;
        }
        for current in CardSide::BOTH {
            if side.is_some_and(|only| only != current) {
                continue;
            }
            let history = self.history(current);
            let window = &history[history.len().saturating_sub(history_length)..];
            for &correct in window {
                if correct {
                    counts.correct += 1;
                } else {
                    counts.wrong += 1;
                }
            }
            counts.missing += history_length - window.len();
        }
        counts
    }

    /// Study priority of the given side over the last `history_length`
    /// answers.
    pub fn score(&self, side: CardSide, history_length: usize) -> Score {
        let history = self.history(side);
        let window = &history[history.len().saturating_sub(history_length)..];
        Score {
            samples: window.len(),
            correct: window.iter().filter(|&&correct| correct).count(),
        }
    }
}

/// Settings the surrounding UI persists between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// How many recent answers per side feed into card selection.
    pub history_length: usize,
    /// Whether answers must be typed out instead of self-graded.
    pub typewriter_mode: bool,
    /// Capacity of the recently-shown-card exclusion queue.
    pub recent_capacity: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            history_length: 10,
            typewriter_mode: false,
            recent_capacity: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card_with_histories(front: &[bool], back: &[bool]) -> Card {
        let mut card = Card::new("front", "back");
        card.front_history = front.to_vec();
        card.back_history = back.to_vec();
        card
    }

    #[test]
    fn opposite_side() {
        assert_eq!(CardSide::Front.opposite(), CardSide::Back);
        assert_eq!(CardSide::Back.opposite(), CardSide::Front);
    }

    #[test]
    fn side_text() {
        let card = Card::new("question", "answer");
        assert_eq!(card.side_text(CardSide::Front), "question");
        assert_eq!(card.side_text(CardSide::Back), "answer");
    }

    #[test]
    fn record_answer_appends_in_order() {
        let mut card = Card::new("a", "b");
        card.record_answer(CardSide::Front, true);
        card.record_answer(CardSide::Front, false);
        card.record_answer(CardSide::Back, true);
        assert_eq!(card.history(CardSide::Front), &[true, false]);
        assert_eq!(card.history(CardSide::Back), &[true]);
    }

    #[test]
    fn set_text_clears_both_histories() {
        let mut card = card_with_histories(&[true], &[false, true]);
        card.set_text("new front", "new back");
        assert_eq!(card.front, "new front");
        assert_eq!(card.back, "new back");
        assert!(card.front_history.is_empty());
        assert!(card.back_history.is_empty());
    }

    #[test]
    fn answer_counts_uses_window() {
        let card = card_with_histories(&[true, false, true, true], &[]);
        let counts = card.answer_counts(Some(CardSide::Front), 2);
        assert_eq!(
            counts,
            AnswerCounts {
                correct: 2,
                wrong: 0,
                missing: 0
            }
        );
    }

    #[test]
    fn answer_counts_fills_missing() {
        let card = card_with_histories(&[true, false, true, true], &[]);
        let counts = card.answer_counts(Some(CardSide::Front), 10);
        assert_eq!(
            counts,
            AnswerCounts {
                correct: 3,
                wrong: 1,
                missing: 6
            }
        );
    }

    #[test]
    fn answer_counts_zero_window() {
        let card = card_with_histories(&[true, false], &[true]);
        assert_eq!(card.answer_counts(None, 0), AnswerCounts::default());
    }

    #[test]
    fn answer_counts_both_sides() {
        let card = card_with_histories(&[true], &[false, false]);
        let counts = card.answer_counts(None, 2);
        assert_eq!(
            counts,
            AnswerCounts {
                correct: 1,
                wrong: 2,
                missing: 1
            }
        );
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn answer_counts_sum() {
        let first = AnswerCounts {
            correct: 1,
            wrong: 2,
            missing: 3,
        };
        let second = AnswerCounts {
            correct: 4,
            wrong: 0,
            missing: 1,
        };
        assert_eq!(
            [first, second].into_iter().sum::<AnswerCounts>(),
            AnswerCounts {
                correct: 5,
                wrong: 2,
                missing: 4
            }
        );
    }

    #[test]
    fn score_of_empty_history() {
        let card = Card::new("a", "b");
        assert_eq!(
            card.score(CardSide::Front, 5),
            Score {
                samples: 0,
                correct: 0
            }
        );
    }

    #[test]
    fn score_uses_window() {
        let card = card_with_histories(&[true, false, true], &[]);
        assert_eq!(
            card.score(CardSide::Front, 2),
            Score {
                samples: 2,
                correct: 1
            }
        );
        assert_eq!(
            card.score(CardSide::Front, 5),
            Score {
                samples: 3,
                correct: 2
            }
        );
    }

    #[test]
    fn score_orders_samples_before_correct() {
        let unseen = Score {
            samples: 0,
            correct: 0,
        };
        let failed_once = Score {
            samples: 1,
            correct: 0,
        };
        let passed_once = Score {
            samples: 1,
            correct: 1,
        };
        let failed_twice = Score {
            samples: 2,
            correct: 0,
        };
        assert!(unseen < failed_once);
        assert!(failed_once < passed_once);
        // sample count dominates the correct count
        assert!(passed_once < failed_twice);
    }

    #[test]
    fn config_defaults() {
        let config = StudyConfig::default();
        assert_eq!(config.history_length, 10);
        assert!(!config.typewriter_mode);
        assert_eq!(config.recent_capacity, 5);
    }
}
