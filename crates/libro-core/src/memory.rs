//! In-memory book repository
//!
//! Reference implementation of the repository boundary. Used as the test
//! backend and for local tooling that does not want a running API server.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::repository::{BookRepository, RepositoryError};
use crate::types::{Book, BookSource, Section, SectionContent, SectionType};

/// Books held in process memory, keyed by building id.
#[derive(Default)]
pub struct MemoryBookRepository {
    books: Mutex<HashMap<String, Book>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a book directly, bypassing the create path. Replaces any book
    /// already stored for the same building.
    pub async fn insert_book(&self, book: Book) {
        let mut books = self.books.lock().await;
        books.insert(book.building_id.clone(), book);
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn book_for_building(&self, building_id: &str) -> Result<Book, RepositoryError> {
        let books = self.books.lock().await;
        books
            .get(building_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn create_book(
        &self,
        building_id: &str,
        source: BookSource,
    ) -> Result<Book, RepositoryError> {
        let mut books = self.books.lock().await;
        if books.contains_key(building_id) {
            return Err(RepositoryError::Conflict);
        }
        let book = Book {
            id: Uuid::new_v4().to_string(),
            building_id: building_id.to_string(),
            source,
            sections: Vec::new(),
        };
        books.insert(building_id.to_string(), book.clone());
        tracing::info!(book_id = %book.id, building_id, "created book");
        Ok(book)
    }

    async fn upsert_section(
        &self,
        book_id: &str,
        section_type: SectionType,
        content: SectionContent,
        complete: bool,
    ) -> Result<Book, RepositoryError> {
        let mut books = self.books.lock().await;
        let book = books
            .values_mut()
            .find(|b| b.id == book_id)
            .ok_or(RepositoryError::NotFound)?;

        match book
            .sections
            .iter_mut()
            .find(|s| s.section_type == section_type.as_str())
        {
            Some(section) => {
                section.content = content;
                section.complete = complete;
            }
            None => book.sections.push(Section {
                id: Uuid::new_v4().to_string(),
                section_type: section_type.as_str().to_string(),
                content,
                complete,
            }),
        }
        Ok(book.clone())
    }
}
