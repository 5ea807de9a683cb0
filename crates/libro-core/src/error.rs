//! Error types for the digital book core

use thiserror::Error;

/// Failures surfaced by the book session and wizard.
///
/// Validation problems are not errors: a missing required field blocks
/// the transition and is reported through the wizard's step result, not
/// through this enum.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("No book found for building: {0}")]
    NotFound(String),

    #[error("Failed to fetch book: {0}")]
    Fetch(String),

    #[error("Failed to save section: {0}")]
    Save(String),

    #[error("Unknown section id: {0}")]
    UnknownSection(String),

    #[error("Book {book_id} contains more than one {section_type} section")]
    DuplicateSectionType {
        book_id: String,
        section_type: String,
    },

    #[error("Wizard has no active editing step")]
    NoActiveStep,
}
