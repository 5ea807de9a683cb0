//! Mapping between UI catalog ids and canonical backend section types
//!
//! The same logical section is addressed by three identifiers: the static
//! UI catalog id, the backend's canonical type enum, and the
//! backend-assigned record id. This module owns the first two; record ids
//! stay opaque to the core. The lookup tables are built once from the
//! closed catalog and never change.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::catalog::SECTION_CATALOG;
use crate::error::BookError;
use crate::types::SectionType;

lazy_static! {
    static ref UI_TO_TYPE: HashMap<&'static str, SectionType> = SECTION_CATALOG
        .iter()
        .map(|d| (d.id, d.section_type))
        .collect();
    static ref TYPE_TO_UI: HashMap<SectionType, &'static str> = SECTION_CATALOG
        .iter()
        .map(|d| (d.section_type, d.id))
        .collect();
}

/// Canonical backend type for a UI catalog id.
///
/// Total over the closed catalog; anything else indicates a programming
/// defect and fails rather than being assumed away.
pub fn canonical_type(ui_id: &str) -> Result<SectionType, BookError> {
    UI_TO_TYPE
        .get(ui_id)
        .copied()
        .ok_or_else(|| BookError::UnknownSection(ui_id.to_string()))
}

/// UI catalog id for a backend wire type.
///
/// Partial on purpose: a backend newer than this build may return section
/// types with no catalog entry, and those resolve to `None` so the UI
/// can ignore them instead of crashing.
pub fn ui_id(wire_type: &str) -> Option<&'static str> {
    SectionType::parse(wire_type).and_then(|t| TYPE_TO_UI.get(&t).copied())
}
