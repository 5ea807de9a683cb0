//! In-memory session state for one building's book
//!
//! Holds the authoritative snapshot the wizard reads and writes: the last
//! book returned by the backend, the per-section form content being
//! edited, the completion projection, and display-only file attachments.

use std::collections::{HashMap, HashSet};

use crate::catalog;
use crate::error::BookError;
use crate::repository::{BookRepository, RepositoryError};
use crate::resolver;
use crate::types::{Book, BookSource, FileAttachment, SectionContent};

/// Client-side state for one building's book.
#[derive(Debug)]
pub struct BookSession {
    book: Book,
    form_data: HashMap<&'static str, SectionContent>,
    completed: HashSet<&'static str>,
    attachments: HashMap<&'static str, Vec<FileAttachment>>,
}

/// Resolve a section key given as either a UI catalog id or a backend
/// wire type. Content lookups accept both, so the two identity spaces
/// cannot drift apart.
fn normalize_key(key: &str) -> Option<&'static str> {
    catalog::definition_by_id(key)
        .map(|d| d.id)
        .or_else(|| resolver::ui_id(key))
}

fn completed_projection(book: &Book) -> HashSet<&'static str> {
    book.sections
        .iter()
        .filter(|s| s.complete)
        .filter_map(|s| resolver::ui_id(&s.section_type))
        .collect()
}

impl BookSession {
    /// Fetch the building's book, creating it when none exists yet.
    ///
    /// Get-or-create is idempotent: a create conflict means the book
    /// appeared between our fetch and create, and the existing record
    /// wins. Any other failure leaves the session unbuilt; editing
    /// without a real book id is not allowed.
    pub async fn load(
        repo: &dyn BookRepository,
        building_id: &str,
        source: BookSource,
    ) -> Result<Self, BookError> {
        let book = match repo.book_for_building(building_id).await {
            Ok(book) => book,
            Err(RepositoryError::NotFound) => {
                tracing::info!(building_id, "no book yet, creating one");
                match repo.create_book(building_id, source).await {
                    Ok(book) => book,
                    Err(RepositoryError::Conflict) => repo
                        .book_for_building(building_id)
                        .await
                        .map_err(|e| fetch_failure(building_id, e))?,
                    Err(e) => return Err(BookError::Save(e.to_string())),
                }
            }
            Err(e) => return Err(fetch_failure(building_id, e)),
        };
        Self::from_book(book)
    }

    /// Project a fetched book into session state.
    ///
    /// Sections whose type has no catalog entry are skipped; two sections
    /// of the same recognized type are a data-integrity error.
    pub fn from_book(book: Book) -> Result<Self, BookError> {
        let mut form_data = HashMap::new();
        for section in &book.sections {
            let Some(ui) = resolver::ui_id(&section.section_type) else {
                tracing::debug!(
                    section_type = %section.section_type,
                    "ignoring section with no catalog entry"
                );
                continue;
            };
            if form_data.insert(ui, section.content.clone()).is_some() {
                return Err(BookError::DuplicateSectionType {
                    book_id: book.id.clone(),
                    section_type: section.section_type.clone(),
                });
            }
        }
        let completed = completed_projection(&book);
        Ok(Self {
            book,
            form_data,
            completed,
            attachments: HashMap::new(),
        })
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Form content for a section, addressed by UI id or wire type.
    pub fn form_content(&self, key: &str) -> Option<&SectionContent> {
        normalize_key(key).and_then(|ui| self.form_data.get(ui))
    }

    /// Write one field of a section's form content.
    pub fn set_field(
        &mut self,
        section_key: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), BookError> {
        let ui = normalize_key(section_key)
            .ok_or_else(|| BookError::UnknownSection(section_key.to_string()))?;
        self.form_data
            .entry(ui)
            .or_default()
            .insert(field.to_string(), value);
        Ok(())
    }

    /// Sections currently marked complete, as UI catalog ids. Recomputed
    /// from the book after every successful save, never hand-mutated.
    pub fn completed_section_ids(&self) -> &HashSet<&'static str> {
        &self.completed
    }

    pub fn is_complete(&self, key: &str) -> bool {
        normalize_key(key).is_some_and(|ui| self.completed.contains(ui))
    }

    /// Attach a file reference to a section for display. Attachments stay
    /// local to the session; persistence is the document subsystem's job.
    pub fn attach_document(&mut self, section_key: &str, file: FileAttachment) -> Result<(), BookError> {
        let ui = normalize_key(section_key)
            .ok_or_else(|| BookError::UnknownSection(section_key.to_string()))?;
        self.attachments.entry(ui).or_default().push(file);
        Ok(())
    }

    pub fn documents(&self, section_key: &str) -> &[FileAttachment] {
        normalize_key(section_key)
            .and_then(|ui| self.attachments.get(ui))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace the book with the value the backend returned from a save
    /// and recompute the completion projection. The saved section's form
    /// content is reseeded from the authoritative record; unsaved edits
    /// to other sections are kept.
    pub fn absorb_saved(&mut self, book: Book, saved_section_key: &str) {
        if let Some(ui) = normalize_key(saved_section_key) {
            let saved = book
                .sections
                .iter()
                .find(|s| resolver::ui_id(&s.section_type) == Some(ui));
            if let Some(section) = saved {
                self.form_data.insert(ui, section.content.clone());
            }
        }
        self.completed = completed_projection(&book);
        self.book = book;
    }
}

fn fetch_failure(building_id: &str, err: RepositoryError) -> BookError {
    match err {
        RepositoryError::NotFound => BookError::NotFound(building_id.to_string()),
        other => BookError::Fetch(other.to_string()),
    }
}
