//! Content model and core logic for the Mandarin vocabulary trainer.
//!
//! Lesson content arrives as ordered blocks of vocabulary words. This crate
//! validates those blocks into a flat, annotated word list ([`validation`]),
//! derives multiple-choice options for quizzes ([`choices`]), computes which
//! content a user has unlocked ([`progress`]), and builds the word-lookup
//! dictionary ([`dictionary`]). All of it is synchronous, pure computation
//! over in-memory collections.

pub mod choices;
pub mod dictionary;
pub mod progress;
pub mod validation;

use serde::{Deserialize, Serialize};

/// A single vocabulary entry. The traditional form is the identity key and
/// must be unique across the whole content set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub traditional: String,
    pub simplified: String,
    pub pinyin: String,
    pub english: String,
    pub english_alternate_choices: Vec<String>,
    pub usage_notes: String,
    pub part_of_speech: String,
}

impl Word {
    /// Placeholder rows in the content sheets have no traditional form.
    pub fn is_filler(&self) -> bool {
        self.traditional.is_empty()
    }

    /// Case-insensitive match against the traditional, pinyin, or english
    /// fields, used by the word search screens.
    pub fn matches_search_term(&self, search_term: &str) -> bool {
        let term = search_term.to_lowercase();
        self.traditional.to_lowercase().contains(&term)
            || self.pinyin.to_lowercase().contains(&term)
            || self.english.to_lowercase().contains(&term)
    }
}

/// One teaching unit: an ordered block of up to 25 words.
pub type Lesson = Vec<Word>;

/// The full ordered content set. Trailing blocks may be empty placeholders
/// for future content.
pub type LessonSet = Vec<Lesson>;

/// A word tagged with the 1-based index of the lesson it came from. Produced
/// by [`validation::validate_and_flatten`] and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedWord {
    #[serde(flatten)]
    pub word: Word,
    pub lesson_key: usize,
}

/// Which quizzes a user has passed for one lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonScore {
    pub mc_english: bool,
    pub mc_mandarin: bool,
    pub quiz_text: bool,
}

/// Per-user progress record. Owned and persisted by the surrounding app;
/// this crate only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStatus {
    pub final_completed_lesson_index: usize,
    pub lesson_score_history: Vec<LessonScore>,
}

/// The quiz a score was earned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizScoreType {
    McEnglish,
    McMandarin,
    QuizText,
}

/// What kind of session a lesson was studied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonKind {
    Lesson,
    Game,
    Review,
}

/// Which character set the app renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppLanguageSetting {
    Simplified,
    Traditional,
}

impl AppLanguageSetting {
    /// The other character set, for the settings toggle.
    pub fn alternate(self) -> Self {
        match self {
            AppLanguageSetting::Simplified => AppLanguageSetting::Traditional,
            AppLanguageSetting::Traditional => AppLanguageSetting::Simplified,
        }
    }

    /// Human readable form shown in the settings menu and toasts.
    pub fn user_facing(self) -> &'static str {
        match self {
            AppLanguageSetting::Simplified => "Simplified Chinese",
            AppLanguageSetting::Traditional => "Traditional Chinese",
        }
    }
}

impl std::fmt::Display for AppLanguageSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let setting = match self {
            AppLanguageSetting::Simplified => "simplified",
            AppLanguageSetting::Traditional => "traditional",
        };
        write!(f, "{setting}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppDifficultySetting {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for AppDifficultySetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let setting = match self {
            AppDifficultySetting::Easy => "easy",
            AppDifficultySetting::Medium => "medium",
            AppDifficultySetting::Hard => "hard",
        };
        write!(f, "{setting}")
    }
}

/// Whether a lesson block contains any real (non-filler) entries.
pub fn lesson_has_content(lesson: &Lesson) -> bool {
    lesson.iter().any(|word| !word.is_filler())
}

/// Drop placeholder entries from a lesson block.
pub fn filter_empty_words(lesson: &Lesson) -> Lesson {
    lesson.iter().filter(|word| !word.is_filler()).cloned().collect()
}

/// Words whose traditional form is a single character, for one-character
/// practice mode. Counted in characters, not bytes.
pub fn filter_for_one_character_mode(words: &[Word]) -> Vec<Word> {
    words
        .iter()
        .filter(|word| word.traditional.chars().count() == 1)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_word(traditional: &str, pinyin: &str, english: &str) -> Word {
        Word {
            traditional: traditional.to_string(),
            simplified: traditional.to_string(),
            pinyin: pinyin.to_string(),
            english: english.to_string(),
            ..Word::default()
        }
    }

    #[test]
    fn test_search_term_matches_any_field() {
        let word = make_word("你好", "nǐ hǎo", "Hello");

        assert!(word.matches_search_term("你"));
        assert!(word.matches_search_term("hǎo"));
        assert!(word.matches_search_term("hello"));
        assert!(!word.matches_search_term("goodbye"));
    }

    #[test]
    fn test_one_character_mode_counts_characters_not_bytes() {
        let words = vec![
            make_word("龍", "lóng", "dragon"),
            make_word("你好", "nǐ hǎo", "Hello"),
        ];

        let filtered = filter_for_one_character_mode(&words);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].traditional, "龍");
    }

    #[test]
    fn test_filler_entries_are_detected() {
        let lesson = vec![make_word("貓", "māo", "cat"), Word::default()];

        assert!(lesson_has_content(&lesson));
        assert_eq!(filter_empty_words(&lesson).len(), 1);

        let placeholders = vec![Word::default(), Word::default()];
        assert!(!lesson_has_content(&placeholders));
    }

    #[test]
    fn test_word_deserializes_from_content_sheet_shape() {
        let raw = r#"{
            "traditional": "謝謝",
            "simplified": "谢谢",
            "pinyin": "xièxie",
            "english": "Thank you",
            "english_alternate_choices": ["Please", "Sorry", "Goodbye"],
            "usage_notes": "",
            "part_of_speech": "interjection"
        }"#;

        let word: Word = serde_json::from_str(raw).unwrap();
        assert_eq!(word.traditional, "謝謝");
        assert_eq!(word.english_alternate_choices.len(), 3);
    }

    #[test]
    fn test_language_setting_alternate_toggles() {
        assert_eq!(
            AppLanguageSetting::Simplified.alternate(),
            AppLanguageSetting::Traditional
        );
        assert_eq!(
            AppLanguageSetting::Traditional.alternate(),
            AppLanguageSetting::Simplified
        );
        assert_eq!(
            AppLanguageSetting::Simplified.user_facing(),
            "Simplified Chinese"
        );
    }
}
