//! Completion metrics derived from a book
//!
//! Any view that displays digital-book progress recomputes these numbers
//! from the book snapshot it was given; no consumer holds its own copy of
//! completion state.

use serde::Serialize;

use crate::catalog::SECTION_COUNT;
use crate::resolver;
use crate::types::Book;

/// Completed-section count and rounded percentage for a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookProgress {
    pub completed_count: usize,
    pub percentage: u8,
}

/// Project a book onto its progress metrics.
///
/// A missing section record counts as not complete, and sections with
/// unrecognized types are ignored; a book with zero sections is simply
/// 0%.
pub fn book_progress(book: &Book) -> BookProgress {
    let completed_count = book
        .sections
        .iter()
        .filter(|s| s.complete && resolver::ui_id(&s.section_type).is_some())
        .count()
        .min(SECTION_COUNT);
    let percentage = ((completed_count as f64 / SECTION_COUNT as f64) * 100.0).round() as u8;
    BookProgress {
        completed_count,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SECTION_CATALOG;
    use crate::types::{BookSource, Section, SectionContent};
    use proptest::prelude::*;

    fn book_with_completed(count: usize) -> Book {
        let sections = SECTION_CATALOG
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, def)| Section {
                id: format!("s-{i}"),
                section_type: def.section_type.as_str().to_string(),
                content: SectionContent::new(),
                complete: true,
            })
            .collect();
        Book {
            id: "book-1".to_string(),
            building_id: "building-1".to_string(),
            source: BookSource::Manual,
            sections,
        }
    }

    #[test]
    fn empty_book_is_zero_percent() {
        let progress = book_progress(&book_with_completed(0));
        assert_eq!(progress, BookProgress { completed_count: 0, percentage: 0 });
    }

    #[test]
    fn one_of_eight_rounds_to_thirteen() {
        let progress = book_progress(&book_with_completed(1));
        assert_eq!(progress.completed_count, 1);
        assert_eq!(progress.percentage, 13);
    }

    #[test]
    fn all_sections_complete_is_one_hundred_percent() {
        let progress = book_progress(&book_with_completed(8));
        assert_eq!(progress, BookProgress { completed_count: 8, percentage: 100 });
    }

    #[test]
    fn incomplete_and_unknown_sections_do_not_count() {
        let mut book = book_with_completed(2);
        book.sections[0].complete = false;
        book.sections.push(Section {
            id: "s-x".to_string(),
            section_type: "SOLAR_PANELS".to_string(),
            content: SectionContent::new(),
            complete: true,
        });
        let progress = book_progress(&book);
        assert_eq!(progress.completed_count, 1);
    }

    proptest! {
        /// Percentage is bounded and consistent with the count for any
        /// mix of complete flags.
        #[test]
        fn percentage_is_bounded(flags in proptest::collection::vec(any::<bool>(), 0..=8)) {
            let mut book = book_with_completed(flags.len());
            for (section, flag) in book.sections.iter_mut().zip(&flags) {
                section.complete = *flag;
            }
            let progress = book_progress(&book);
            prop_assert!(progress.percentage <= 100);
            prop_assert!(progress.completed_count <= 8);
            let expected =
                ((progress.completed_count as f64 / 8.0) * 100.0).round() as u8;
            prop_assert_eq!(progress.percentage, expected);
        }

        /// Completing one more section never lowers progress.
        #[test]
        fn progress_is_monotone_in_completed_count(count in 0usize..8) {
            let before = book_progress(&book_with_completed(count));
            let after = book_progress(&book_with_completed(count + 1));
            prop_assert!(after.completed_count > before.completed_count);
            prop_assert!(after.percentage >= before.percentage);
        }
    }
}
