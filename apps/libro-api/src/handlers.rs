//! HTTP handlers for the book API

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use libro_core::{Book, BookSource, Section, SectionContent, SectionType};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Create the book for a building, or return the existing one.
///
/// A building has at most one book, so this endpoint is idempotent:
/// racing creates collapse onto the row that won the unique index.
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<Json<Book>, ApiError> {
    if req.building_id.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "building_id must not be empty".to_string(),
        ));
    }

    let source = req.source.unwrap_or(BookSource::Manual);
    let book_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO books (id, building_id, source, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(building_id) DO NOTHING
        "#,
    )
    .bind(&book_id)
    .bind(&req.building_id)
    .bind(source.to_string())
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&state.db)
    .await?;

    let book = load_book_by_building(&state.db, &req.building_id)
        .await?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("book missing after insert")))?;

    tracing::info!("Book {} ready for building {}", book.id, req.building_id);

    Ok(Json(book))
}

/// Get the book for a building
pub async fn get_book_by_building(
    State(state): State<Arc<AppState>>,
    Path(building_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let book = load_book_by_building(&state.db, &building_id)
        .await?
        .ok_or_else(|| ApiError::NoBookForBuilding(building_id.clone()))?;
    Ok(Json(book))
}

/// Create or update one section of a book, keyed by canonical type.
/// Returns the full refreshed book.
pub async fn upsert_section(
    State(state): State<Arc<AppState>>,
    Path((book_id, section_type)): Path<(String, String)>,
    Json(req): Json<UpsertSectionRequest>,
) -> Result<Json<Book>, ApiError> {
    let section_type = SectionType::parse(&section_type)
        .ok_or_else(|| ApiError::UnknownSectionType(section_type.clone()))?;

    let book_row: Option<DbBook> = sqlx::query_as(
        r#"
        SELECT id, building_id, source
        FROM books
        WHERE id = ?
        "#,
    )
    .bind(&book_id)
    .fetch_optional(&state.db)
    .await?;

    let book_row = book_row.ok_or_else(|| ApiError::BookNotFound(book_id.clone()))?;

    let content_json = serde_json::to_string(&req.content)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid section content: {}", e)))?;
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO sections (id, book_id, section_type, content_json, complete, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(book_id, section_type) DO UPDATE SET
            content_json = excluded.content_json,
            complete = excluded.complete,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&book_id)
    .bind(section_type.as_str())
    .bind(&content_json)
    .bind(req.complete)
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&state.db)
    .await?;

    sqlx::query("UPDATE books SET updated_at = ? WHERE id = ?")
        .bind(now.to_rfc3339())
        .bind(&book_id)
        .execute(&state.db)
        .await?;

    tracing::info!(
        "Upserted section {} on book {} (complete: {})",
        section_type,
        book_id,
        req.complete
    );

    let book = assemble_book(&state.db, book_row).await?;
    Ok(Json(book))
}

/// Load a book with its sections, by building id.
async fn load_book_by_building(
    db: &sqlx::SqlitePool,
    building_id: &str,
) -> Result<Option<Book>, ApiError> {
    let book_row: Option<DbBook> = sqlx::query_as(
        r#"
        SELECT id, building_id, source
        FROM books
        WHERE building_id = ?
        "#,
    )
    .bind(building_id)
    .fetch_optional(db)
    .await?;

    match book_row {
        Some(row) => Ok(Some(assemble_book(db, row).await?)),
        None => Ok(None),
    }
}

/// Join a book row with its section rows into the wire shape.
async fn assemble_book(db: &sqlx::SqlitePool, row: DbBook) -> Result<Book, ApiError> {
    let section_rows: Vec<DbSection> = sqlx::query_as(
        r#"
        SELECT id, section_type, content_json, complete
        FROM sections
        WHERE book_id = ?
        "#,
    )
    .bind(&row.id)
    .fetch_all(db)
    .await?;

    let mut sections = Vec::with_capacity(section_rows.len());
    for section in section_rows {
        let content: SectionContent = serde_json::from_str(&section.content_json)
            .map_err(|e| ApiError::Internal(e.into()))?;
        sections.push(Section {
            id: section.id,
            section_type: section.section_type,
            content,
            complete: section.complete,
        });
    }

    let source = match row.source.as_str() {
        "manual" => BookSource::Manual,
        "pdf" => BookSource::Pdf,
        "imported" => BookSource::Imported,
        _ => BookSource::Manual,
    };

    Ok(Book {
        id: row.id,
        building_id: row.building_id,
        source,
        sections,
    })
}
