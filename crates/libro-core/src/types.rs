//! Wire-level types for the digital building book

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque field-name → value content of one section.
///
/// The core never interprets values beyond required-field emptiness
/// checks; the schema lives in the section catalog, validation of the
/// actual content is a backend concern.
pub type SectionContent = HashMap<String, serde_json::Value>;

/// Canonical backend identifier for a section's topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionType {
    GeneralData,
    Construction,
    Certificates,
    Maintenance,
    Installations,
    Insurance,
    Renovations,
    Documents,
}

impl SectionType {
    /// Wire representation, as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::GeneralData => "GENERAL_DATA",
            SectionType::Construction => "CONSTRUCTION",
            SectionType::Certificates => "CERTIFICATES",
            SectionType::Maintenance => "MAINTENANCE",
            SectionType::Installations => "INSTALLATIONS",
            SectionType::Insurance => "INSURANCE",
            SectionType::Renovations => "RENOVATIONS",
            SectionType::Documents => "DOCUMENTS",
        }
    }

    /// Parse a wire string. Returns `None` for types this build does not
    /// know about, so newer backend types degrade gracefully.
    pub fn parse(value: &str) -> Option<SectionType> {
        match value {
            "GENERAL_DATA" => Some(SectionType::GeneralData),
            "CONSTRUCTION" => Some(SectionType::Construction),
            "CERTIFICATES" => Some(SectionType::Certificates),
            "MAINTENANCE" => Some(SectionType::Maintenance),
            "INSTALLATIONS" => Some(SectionType::Installations),
            "INSURANCE" => Some(SectionType::Insurance),
            "RENOVATIONS" => Some(SectionType::Renovations),
            "DOCUMENTS" => Some(SectionType::Documents),
            _ => None,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ingestion origin of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookSource {
    Manual,
    Pdf,
    Imported,
}

impl fmt::Display for BookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookSource::Manual => write!(f, "manual"),
            BookSource::Pdf => write!(f, "pdf"),
            BookSource::Imported => write!(f, "imported"),
        }
    }
}

/// One persisted section record of a book.
///
/// `section_type` stays a raw wire string: the backend may return types
/// newer than this build's catalog, and those must pass through without
/// breaking deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: String,
    pub content: SectionContent,
    pub complete: bool,
}

/// The per-building digital technical dossier.
///
/// Invariant: at most one section per canonical type. A backend that
/// returns duplicates is handing us corrupted data, and session
/// initialization rejects it rather than merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub building_id: String,
    pub source: BookSource,
    pub sections: Vec<Section>,
}

impl Book {
    /// Section record for a canonical type, if one exists yet.
    pub fn section_of_type(&self, section_type: SectionType) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.section_type == section_type.as_str())
    }
}

/// Reference to a file attached to a section, for display only.
/// Attachments are never persisted through the book repository; upload
/// and linkage are handled by the document subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
}
