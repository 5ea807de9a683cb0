//! Boundary to the book backend
//!
//! The core persists through this trait and treats the implementation as
//! opaque: REST service, in-memory store, anything that honors the
//! contract. Every mutation returns the full refreshed book so callers
//! never patch local copies.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Book, BookSource, SectionContent, SectionType};

/// Failures at the repository boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Book not found")]
    NotFound,

    #[error("A book already exists for this building")]
    Conflict,

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Save failed: {0}")]
    Save(String),
}

/// Persistence boundary for books.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Fetch the book for a building. Fails with [`RepositoryError::NotFound`]
    /// when no book exists for that building yet.
    async fn book_for_building(&self, building_id: &str) -> Result<Book, RepositoryError>;

    /// Create an empty book for a building. Safe to call once the
    /// not-found condition has been observed; fails with
    /// [`RepositoryError::Conflict`] when a book appeared in the meantime.
    async fn create_book(
        &self,
        building_id: &str,
        source: BookSource,
    ) -> Result<Book, RepositoryError>;

    /// Create the section if the book has none of this type yet, otherwise
    /// update it in place. Returns the full refreshed book.
    async fn upsert_section(
        &self,
        book_id: &str,
        section_type: SectionType,
        content: SectionContent,
        complete: bool,
    ) -> Result<Book, RepositoryError>;
}
