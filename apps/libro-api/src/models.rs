//! Data models for the book API

use libro_core::{BookSource, SectionContent};
use serde::Deserialize;
use sqlx::FromRow;

/// Book row, without the section join
#[derive(Debug, Clone, FromRow)]
pub struct DbBook {
    pub id: String,
    pub building_id: String,
    pub source: String,
}

/// Section row as stored
#[derive(Debug, Clone, FromRow)]
pub struct DbSection {
    pub id: String,
    pub section_type: String,
    pub content_json: String,
    pub complete: bool,
}

/// Request to create (or fetch) the book for a building
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub building_id: String,
    #[serde(default)]
    pub source: Option<BookSource>,
}

/// Request to create or update one section of a book
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSectionRequest {
    pub content: SectionContent,
    pub complete: bool,
}
