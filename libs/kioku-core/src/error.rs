//! Error types for kioku-core.

use thiserror::Error;

/// Result type alias using StudyError.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Errors surfaced by the study engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudyError {
    /// The deck has no enabled card left to pick from.
    #[error("no studyable cards in deck")]
    NoStudyableCards,
}
