//! Core study engine shared by the UI and storage layers.
//!
//! Provides:
//! - Tokenizer for furigana-annotated card text
//! - Character-wise answer diffing that re-aligns furigana annotations
//! - Card answer-history bookkeeping and study-priority scores
//! - History-based selection of the next card and side to study
//! - Deck merging, summary metadata, and export envelopes

pub mod deck;
pub mod diff;
pub mod error;
pub mod export;
pub mod furigana;
pub mod scheduler;
pub mod types;

pub use deck::{Deck, DeckMetadata};
pub use diff::{diff, diff_to_html, DiffTag, Opcode};
pub use error::{Result, StudyError};
pub use export::{DeckExport, ExportedDeck};
pub use furigana::{tokenize, Token, TokenKind, TokenizedText};
pub use scheduler::{select, RecentQueue};
pub use types::{AnswerCounts, Card, CardSide, Score, StudyConfig};
