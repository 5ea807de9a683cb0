//! Digital building book core
//!
//! Per-building technical dossier filled in through a resumable wizard:
//! a fixed catalog of 8 sections, a resolver between UI catalog ids and
//! canonical backend section types, session state with draft/complete
//! persistence, and progress metrics consumed by dashboard views.

pub mod catalog;
pub mod error;
pub mod memory;
pub mod progress;
pub mod repository;
pub mod resolver;
pub mod session;
pub mod types;
pub mod wizard;

pub use catalog::{FieldKind, FieldSpec, SectionDefinition, SECTION_CATALOG, SECTION_COUNT};
pub use error::BookError;
pub use memory::MemoryBookRepository;
pub use progress::{book_progress, BookProgress};
pub use repository::{BookRepository, RepositoryError};
pub use session::BookSession;
pub use types::{Book, BookSource, FileAttachment, Section, SectionContent, SectionType};
pub use wizard::{StepAdvance, StepView, ValidationFailure, Wizard, WizardState};
