//! Wizard state machine for filling in the book
//!
//! Drives step navigation, required-field gating and save orchestration
//! over the session state. Transitions that persist data suspend until
//! the repository call resolves; a transition has not happened until its
//! save has. Methods take `&mut self`, so a second navigation cannot be
//! issued while a save for the current step is outstanding.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{self, SectionDefinition};
use crate::error::BookError;
use crate::progress::{book_progress, BookProgress};
use crate::repository::BookRepository;
use crate::resolver;
use crate::session::BookSession;
use crate::types::{BookSource, SectionContent};

/// Lifecycle of one wizard instance.
///
/// `Unavailable` and `Finished` are terminal; the only way out is a fresh
/// [`Wizard::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Loading,
    Unavailable,
    Editing(usize),
    Finished,
}

/// Required fields that blocked a step from completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub section_id: &'static str,
    pub missing_fields: Vec<String>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot complete '{}': required fields missing: {}",
            self.section_id,
            self.missing_fields.join(", ")
        )
    }
}

/// Outcome of a successful `go_next` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAdvance {
    /// Moved to the next step.
    Advanced,
    /// Last step completed; the wizard is finished.
    Finished,
    /// Required fields are missing; the step did not change and nothing
    /// was saved.
    Blocked(ValidationFailure),
}

/// What the UI needs to render the current step.
pub struct StepView<'a> {
    pub definition: &'static SectionDefinition,
    pub content: Option<&'a SectionContent>,
    /// `None` when every required field is filled.
    pub validation: Option<ValidationFailure>,
}

/// Check a section's required fields against its form content. A value
/// is empty when absent, null, or a string that trims to nothing.
pub fn validate_section(
    definition: &SectionDefinition,
    content: Option<&SectionContent>,
) -> Option<ValidationFailure> {
    let missing: Vec<String> = definition
        .required_fields()
        .filter(|f| is_empty_value(content.and_then(|c| c.get(f.name))))
        .map(|f| f.name.to_string())
        .collect();
    if missing.is_empty() {
        None
    } else {
        Some(ValidationFailure {
            section_id: definition.id,
            missing_fields: missing,
        })
    }
}

fn is_empty_value(value: Option<&serde_json::Value>) -> bool {
    match value {
        None => true,
        Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// The resumable multi-step wizard for one building's book.
pub struct Wizard {
    repo: Arc<dyn BookRepository>,
    building_id: String,
    state: WizardState,
    session: Option<BookSession>,
    init_error: Option<BookError>,
}

impl Wizard {
    /// Fetch or create the building's book and enter the first step, or
    /// the step whose section id the caller asked to resume at.
    ///
    /// On an unrecoverable failure the wizard lands in
    /// [`WizardState::Unavailable`]: no editing is possible and the UI
    /// should route the user back to the building hub.
    pub async fn initialize(
        repo: Arc<dyn BookRepository>,
        building_id: impl Into<String>,
        source: BookSource,
        start_section: Option<&str>,
    ) -> Wizard {
        let building_id = building_id.into();
        let mut wizard = Wizard {
            repo,
            building_id,
            state: WizardState::Loading,
            session: None,
            init_error: None,
        };
        match BookSession::load(wizard.repo.as_ref(), &wizard.building_id, source).await {
            Ok(session) => {
                let start = match start_section {
                    Some(id) => catalog::index_of(id).unwrap_or_else(|| {
                        tracing::warn!(section = id, "unknown start section, starting at 0");
                        0
                    }),
                    None => 0,
                };
                wizard.session = Some(session);
                wizard.state = WizardState::Editing(start);
            }
            Err(err) => {
                tracing::error!(
                    building_id = %wizard.building_id,
                    error = %err,
                    "book session unavailable"
                );
                wizard.init_error = Some(err);
                wizard.state = WizardState::Unavailable;
            }
        }
        wizard
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn building_id(&self) -> &str {
        &self.building_id
    }

    /// Step index while editing, `None` otherwise.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            WizardState::Editing(i) => Some(i),
            _ => None,
        }
    }

    /// Why the wizard is unavailable, for user-facing reporting.
    pub fn unavailable_reason(&self) -> Option<&BookError> {
        self.init_error.as_ref()
    }

    /// The session, once initialization has succeeded.
    pub fn session(&self) -> Option<&BookSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut BookSession> {
        self.session.as_mut()
    }

    /// Definition, live content and validation state for the current step.
    pub fn current_step(&self) -> Option<StepView<'_>> {
        let WizardState::Editing(index) = self.state else {
            return None;
        };
        let session = self.session.as_ref()?;
        let definition = catalog::definition(index);
        let content = session.form_content(definition.id);
        let validation = validate_section(definition, content);
        Some(StepView {
            definition,
            content,
            validation,
        })
    }

    /// Write one field of the current step's form content.
    pub fn set_field(&mut self, field: &str, value: serde_json::Value) -> Result<(), BookError> {
        let WizardState::Editing(index) = self.state else {
            return Err(BookError::NoActiveStep);
        };
        let session = self.session.as_mut().ok_or(BookError::NoActiveStep)?;
        session.set_field(catalog::definition(index).id, field, value)
    }

    /// Persist the current step as a draft and stay on it. Always
    /// permitted, regardless of field validity.
    pub async fn save_draft(&mut self) -> Result<(), BookError> {
        let WizardState::Editing(index) = self.state else {
            return Err(BookError::NoActiveStep);
        };
        self.save_section(index, false).await
    }

    /// Validate the current step, persist it as complete, and advance.
    ///
    /// A validation failure refuses the transition without saving
    /// anything; a save failure leaves both the step and the unsaved
    /// edits in place so the user can retry.
    pub async fn go_next(&mut self) -> Result<StepAdvance, BookError> {
        let WizardState::Editing(index) = self.state else {
            return Err(BookError::NoActiveStep);
        };
        let definition = catalog::definition(index);
        let content = self
            .session
            .as_ref()
            .ok_or(BookError::NoActiveStep)?
            .form_content(definition.id);
        if let Some(failure) = validate_section(definition, content) {
            return Ok(StepAdvance::Blocked(failure));
        }

        self.save_section(index, true).await?;

        if index + 1 < catalog::SECTION_COUNT {
            self.state = WizardState::Editing(index + 1);
            Ok(StepAdvance::Advanced)
        } else {
            self.state = WizardState::Finished;
            Ok(StepAdvance::Finished)
        }
    }

    /// Move back one step, saving the current content as a draft on the
    /// way out. The draft save is best-effort: a failure is returned for
    /// reporting but never blocks the navigation.
    pub async fn go_previous(&mut self) -> Result<(), BookError> {
        let WizardState::Editing(index) = self.state else {
            return Err(BookError::NoActiveStep);
        };
        if index == 0 {
            return Ok(());
        }
        let saved = self.save_section(index, false).await;
        if let Err(err) = &saved {
            tracing::warn!(step = index, error = %err, "draft save failed while navigating back");
        }
        self.state = WizardState::Editing(index - 1);
        saved
    }

    /// Progress metrics for the session's book; zero when unavailable.
    pub fn progress(&self) -> BookProgress {
        self.session
            .as_ref()
            .map(|s| book_progress(s.book()))
            .unwrap_or_default()
    }

    async fn save_section(&mut self, index: usize, complete: bool) -> Result<(), BookError> {
        let definition = catalog::definition(index);
        let section_type = resolver::canonical_type(definition.id)?;
        let session = self.session.as_mut().ok_or(BookError::NoActiveStep)?;
        let book_id = session.book().id.clone();
        let content = session
            .form_content(definition.id)
            .cloned()
            .unwrap_or_default();

        let refreshed = self
            .repo
            .upsert_section(&book_id, section_type, content, complete)
            .await
            .map_err(|e| BookError::Save(e.to_string()))?;
        tracing::info!(book_id = %book_id, section = definition.id, complete, "section saved");

        session.absorb_saved(refreshed, definition.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SECTION_CATALOG;
    use crate::memory::MemoryBookRepository;

    fn empty_validation_target() -> &'static SectionDefinition {
        catalog::definition_by_id("certificates").unwrap()
    }

    #[test]
    fn validation_reports_missing_required_fields_in_schema_order() {
        let failure = validate_section(empty_validation_target(), None).unwrap();
        assert_eq!(failure.section_id, "certificates");
        assert_eq!(
            failure.missing_fields,
            vec!["energy_certificate_number", "energy_certificate_expiry"]
        );
    }

    #[test]
    fn whitespace_only_strings_are_empty() {
        let mut content = SectionContent::new();
        content.insert("energy_certificate_number".to_string(), "   ".into());
        content.insert("energy_certificate_expiry".to_string(), "2030-01-01".into());
        let failure = validate_section(empty_validation_target(), Some(&content)).unwrap();
        assert_eq!(failure.missing_fields, vec!["energy_certificate_number"]);
    }

    #[test]
    fn non_string_values_count_as_filled() {
        let def = catalog::definition_by_id("maintenance").unwrap();
        let mut content = SectionContent::new();
        content.insert("maintenance_plan".to_string(), serde_json::json!(42));
        assert!(validate_section(def, Some(&content)).is_none());
    }

    #[test]
    fn sections_without_required_fields_always_validate() {
        let def = catalog::definition_by_id("renovations").unwrap();
        assert!(validate_section(def, None).is_none());
    }

    #[tokio::test]
    async fn initialize_starts_at_the_requested_section() {
        let repo = Arc::new(MemoryBookRepository::new());
        let wizard =
            Wizard::initialize(repo, "building-1", BookSource::Manual, Some("maintenance")).await;
        assert_eq!(wizard.state(), WizardState::Editing(3));
    }

    #[tokio::test]
    async fn initialize_falls_back_to_first_step_for_unknown_section() {
        let repo = Arc::new(MemoryBookRepository::new());
        let wizard =
            Wizard::initialize(repo, "building-1", BookSource::Manual, Some("swimming_pool")).await;
        assert_eq!(wizard.state(), WizardState::Editing(0));
    }

    #[tokio::test]
    async fn current_step_exposes_catalog_definition_and_validation() {
        let repo = Arc::new(MemoryBookRepository::new());
        let wizard = Wizard::initialize(repo, "building-1", BookSource::Manual, None).await;
        let step = wizard.current_step().unwrap();
        assert_eq!(step.definition.id, SECTION_CATALOG[0].id);
        assert!(step.content.is_none());
        assert!(step.validation.is_some());
    }

    #[tokio::test]
    async fn go_previous_at_first_step_is_a_no_op() {
        let repo = Arc::new(MemoryBookRepository::new());
        let mut wizard = Wizard::initialize(repo, "building-1", BookSource::Manual, None).await;
        wizard.go_previous().await.unwrap();
        assert_eq!(wizard.state(), WizardState::Editing(0));
        // Nothing was saved on the way "out" of step 0.
        assert!(wizard.session().unwrap().book().sections.is_empty());
    }

    #[tokio::test]
    async fn navigation_is_rejected_outside_editing() {
        let repo = Arc::new(MemoryBookRepository::new());
        let mut wizard = Wizard::initialize(repo, "building-1", BookSource::Manual, None).await;
        wizard.state = WizardState::Finished;
        assert!(matches!(wizard.go_next().await, Err(BookError::NoActiveStep)));
        assert!(matches!(wizard.save_draft().await, Err(BookError::NoActiveStep)));
        assert!(matches!(
            wizard.set_field("address", "x".into()),
            Err(BookError::NoActiveStep)
        ));
    }
}
