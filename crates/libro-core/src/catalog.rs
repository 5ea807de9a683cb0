//! Static catalog of the digital book's sections
//!
//! The book is divided into 8 fixed sections, rendered as wizard steps in
//! catalog order. Each entry defines the fields the step's form carries
//! and which of them must be filled before the step can complete. The
//! catalog is never reshuffled at runtime.

use serde::Serialize;

use crate::types::SectionType;

/// Input widget kind for a section field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Date,
}

/// One field of a section's form schema
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Option<&'static [&'static str]>,
}

/// Static definition of one book section
#[derive(Debug, Clone, Serialize)]
pub struct SectionDefinition {
    pub id: &'static str,
    pub section_type: SectionType,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl SectionDefinition {
    /// Required fields of this section, in schema order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }
}

const fn text(name: &'static str, label: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Text,
        required,
        options: None,
    }
}

const fn textarea(name: &'static str, label: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Textarea,
        required,
        options: None,
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    required: bool,
    options: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Select,
        required,
        options: Some(options),
    }
}

const fn date(name: &'static str, label: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Date,
        required,
        options: None,
    }
}

/// The 8 sections of the building book, in wizard order.
pub const SECTION_CATALOG: &[SectionDefinition] = &[
    SectionDefinition {
        id: "general_data",
        section_type: SectionType::GeneralData,
        title: "General data",
        description: "Identification of the building and its basic characteristics",
        fields: &[
            text("address", "Address", true),
            text("cadastral_reference", "Cadastral reference", true),
            text("construction_year", "Year of construction", true),
            select(
                "typology",
                "Typology",
                true,
                &["Residential", "Mixed use", "Commercial"],
            ),
            text("dwelling_count", "Number of dwellings", true),
            text("plot_area", "Plot area (m²)", false),
            textarea("common_areas", "Common areas", false),
        ],
    },
    SectionDefinition {
        id: "construction",
        section_type: SectionType::Construction,
        title: "Constructive description",
        description: "Structural system and envelope of the building",
        fields: &[
            select(
                "structure_system",
                "Structural system",
                true,
                &[
                    "Reinforced concrete",
                    "Steel frame",
                    "Load-bearing masonry",
                    "Timber",
                ],
            ),
            text("facade_type", "Facade type", false),
            select(
                "roof_type",
                "Roof type",
                false,
                &["Flat", "Pitched", "Inverted flat"],
            ),
            textarea("accessibility_notes", "Accessibility notes", false),
        ],
    },
    SectionDefinition {
        id: "certificates",
        section_type: SectionType::Certificates,
        title: "Certificates",
        description: "Energy certificate and technical inspections",
        fields: &[
            text(
                "energy_certificate_number",
                "Energy certificate number",
                true,
            ),
            date("energy_certificate_expiry", "Energy certificate expiry", true),
            select(
                "energy_rating",
                "Energy rating",
                false,
                &["A", "B", "C", "D", "E", "F", "G"],
            ),
            date("technical_inspection_date", "Technical inspection date", false),
            textarea(
                "technical_inspection_result",
                "Technical inspection result",
                false,
            ),
        ],
    },
    SectionDefinition {
        id: "maintenance",
        section_type: SectionType::Maintenance,
        title: "Maintenance",
        description: "Maintenance plan and service history",
        fields: &[
            textarea("maintenance_plan", "Maintenance plan", true),
            date("last_general_review", "Last general review", false),
            text("maintenance_contractor", "Maintenance contractor", false),
        ],
    },
    SectionDefinition {
        id: "installations",
        section_type: SectionType::Installations,
        title: "Installations",
        description: "Building services and shared installations",
        fields: &[
            select(
                "heating_system",
                "Heating system",
                true,
                &["Central", "Individual", "None"],
            ),
            text("elevator_count", "Number of elevators", false),
            textarea("fire_protection", "Fire protection systems", false),
            text("telecom_infrastructure", "Telecom infrastructure", false),
        ],
    },
    SectionDefinition {
        id: "insurance",
        section_type: SectionType::Insurance,
        title: "Insurance",
        description: "Active insurance policies covering the building",
        fields: &[
            text("policy_number", "Policy number", true),
            text("insurer", "Insurer", true),
            textarea("coverage", "Coverage", false),
            date("expiry_date", "Policy expiry date", false),
        ],
    },
    SectionDefinition {
        id: "renovations",
        section_type: SectionType::Renovations,
        title: "Renovations",
        description: "Completed and planned renovation works",
        fields: &[
            text("last_renovation_year", "Year of last renovation", false),
            textarea("renovation_scope", "Scope of last renovation", false),
            textarea("planned_works", "Planned works", false),
        ],
    },
    SectionDefinition {
        id: "documents",
        section_type: SectionType::Documents,
        title: "Administrative documents",
        description: "Licenses and permits on file for the building",
        fields: &[
            text("occupancy_license", "Occupancy license", false),
            text("building_permit", "Building permit", false),
            textarea("notes", "Notes", false),
        ],
    },
];

/// Number of wizard steps; step indexes are `0..SECTION_COUNT`.
pub const SECTION_COUNT: usize = SECTION_CATALOG.len();

/// Definition at a step index. Panics on an out-of-range index, which the
/// wizard state machine makes unreachable.
pub fn definition(index: usize) -> &'static SectionDefinition {
    &SECTION_CATALOG[index]
}

/// Definition for a UI catalog id.
pub fn definition_by_id(id: &str) -> Option<&'static SectionDefinition> {
    SECTION_CATALOG.iter().find(|d| d.id == id)
}

/// Step index for a UI catalog id.
pub fn index_of(id: &str) -> Option<usize> {
    SECTION_CATALOG.iter().position(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_eight_sections() {
        assert_eq!(SECTION_COUNT, 8);
    }

    #[test]
    fn section_ids_are_unique() {
        for (i, a) in SECTION_CATALOG.iter().enumerate() {
            for b in &SECTION_CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.section_type, b.section_type);
            }
        }
    }

    #[test]
    fn general_data_has_five_required_fields() {
        let def = definition_by_id("general_data").unwrap();
        assert_eq!(def.required_fields().count(), 5);
    }

    #[test]
    fn certificates_has_two_required_fields() {
        let def = definition_by_id("certificates").unwrap();
        assert_eq!(def.required_fields().count(), 2);
    }

    #[test]
    fn field_names_are_unique_within_a_section() {
        for def in SECTION_CATALOG {
            for (i, a) in def.fields.iter().enumerate() {
                for b in &def.fields[i + 1..] {
                    assert_ne!(a.name, b.name, "duplicate field in {}", def.id);
                }
            }
        }
    }

    #[test]
    fn select_fields_carry_options() {
        for def in SECTION_CATALOG {
            for field in def.fields {
                match field.kind {
                    FieldKind::Select => {
                        assert!(field.options.is_some_and(|o| !o.is_empty()))
                    }
                    _ => assert!(field.options.is_none()),
                }
            }
        }
    }

    #[test]
    fn step_order_matches_catalog_order() {
        assert_eq!(definition(0).id, "general_data");
        assert_eq!(definition(2).id, "certificates");
        assert_eq!(definition(3).id, "maintenance");
        assert_eq!(index_of("documents"), Some(7));
        assert_eq!(index_of("unknown"), None);
    }
}
