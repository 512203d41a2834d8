//! Lesson content validation.
//!
//! The content sheets are hand-maintained, so every release runs the full
//! lesson set through [`validate_and_flatten`] at startup. It enforces the
//! structural invariants (fixed block size, no duplicate entries) and
//! produces the flat annotated word list the rest of the app works from,
//! along with a human readable summary of the content.

use std::collections::HashSet;

use crate::{AnnotatedWord, LessonSet};

/// Fixed size of a full lesson block.
pub const LESSON_MAX: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("Invalid length for Mandarin lesson {lesson}: expected {expected} but received {actual}")]
    InvalidLessonLength {
        lesson: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid length for non-final Mandarin lesson {lesson}: expected {expected} but received {actual}")]
    InvalidNonFinalLessonLength {
        lesson: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate word detected in lesson {lesson}! -> {traditional} ({english})")]
    DuplicateWord {
        lesson: usize,
        traditional: String,
        english: String,
    },
}

/// There can be several empty placeholder lesson blocks at the end of the
/// set. Determine the last block which has content (this one is allowed to
/// be partially filled).
fn determine_final_lesson_block(content_blocks: &LessonSet) -> usize {
    content_blocks
        .iter()
        .enumerate()
        .fold(0, |final_index, (index, lesson)| {
            if lesson.is_empty() { final_index } else { index }
        })
}

/// Combine the individual lesson blocks into one annotated word list and
/// check the content invariants.
///
/// Every block up to the final non-empty one must hold exactly
/// [`LESSON_MAX`] entries; only the final block may be partially filled.
/// Entries with an empty traditional form are placeholder rows and are
/// dropped from the flattened output. The traditional form of every real
/// entry must be unique across the entire set.
///
/// The short-length check and the summary only consider blocks up to the
/// final one with content, while the flatten-and-deduplicate scan covers
/// every entry in the set. The two gates are deliberately kept separate;
/// that is how the content sheets have always been ingested, and it stays
/// that way until the sheets are restructured.
///
/// Returns the flattened list plus the summary text, which is also emitted
/// on the info log.
pub fn validate_and_flatten(
    content_blocks: &LessonSet,
) -> Result<(Vec<AnnotatedWord>, String), ContentValidationError> {
    let mut total_words = 0;
    let mut summary = String::from("\nContent Summary for Mandarin:\n\n");
    let mut word_set = HashSet::new();
    let final_lesson_index = determine_final_lesson_block(content_blocks);

    let mut content = Vec::new();

    for (index, lesson) in content_blocks.iter().enumerate() {
        if lesson.len() > LESSON_MAX {
            return Err(ContentValidationError::InvalidLessonLength {
                lesson: index + 1,
                expected: LESSON_MAX,
                actual: lesson.len(),
            });
        } else if !lesson.is_empty() && lesson.len() < LESSON_MAX && index < final_lesson_index {
            return Err(ContentValidationError::InvalidNonFinalLessonLength {
                lesson: index + 1,
                expected: LESSON_MAX,
                actual: lesson.len(),
            });
        } else if index <= final_lesson_index {
            total_words += lesson.len();
            // Pad single digit counts so the columns line up
            let pad = if lesson.len() < 10 { " " } else { "" };
            summary.push_str(&format!(
                "Lesson {lesson_number} - {count} {pad}total words\n",
                lesson_number = index + 1,
                count = lesson.len(),
            ));
        }

        for word in lesson.iter().filter(|word| !word.is_filler()) {
            if !word_set.insert(word.traditional.clone()) {
                return Err(ContentValidationError::DuplicateWord {
                    lesson: index + 1,
                    traditional: word.traditional.clone(),
                    english: word.english.clone(),
                });
            }

            content.push(AnnotatedWord {
                word: word.clone(),
                lesson_key: index + 1,
            });
        }
    }

    summary.push_str(&format!("\nTotal: {total_words} words"));
    log::info!("{summary}");

    Ok((content, summary))
}
