//! Multiple-choice option sampling for the quiz screens.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Word;

/// Which quiz is asking for options. The Mandarin and pronunciation quizzes
/// draw decoys from the lesson pool; the English quiz draws them from the
/// target word's own alternate translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultipleChoiceMode {
    Mandarin,
    English,
    MandarinPronunciation,
}

/// Options shown per question, including the correct answer.
pub const CHOICE_COUNT: usize = 4;

const DECOYS_NEEDED: usize = CHOICE_COUNT - 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChoiceError {
    #[error("'{traditional}' has {available} alternate english choices but {needed} are needed")]
    InsufficientAlternates {
        traditional: String,
        available: usize,
        needed: usize,
    },

    #[error("the pool holds {available} qualifying decoys for '{traditional}' but {needed} are needed")]
    InsufficientCandidates {
        traditional: String,
        available: usize,
        needed: usize,
    },
}

/// Return a random number in the given range.
///
/// Floor arithmetic over a float draw, so a reversed range walks downward
/// from `min` instead of panicking.
pub fn random_in_range(rng: &mut impl Rng, min: i64, max: i64) -> i64 {
    (rng.random::<f64>() * (max - min) as f64 + min as f64).floor() as i64
}

/// In-place Fisher-Yates shuffle: a uniformly random permutation in O(n).
pub fn knuth_shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    let mut current_index = items.len();

    while current_index != 0 {
        let random_index = random_in_range(rng, 0, current_index as i64) as usize;
        current_index -= 1;
        items.swap(current_index, random_index);
    }
}

/// English-mode decoys are bare translations, so every other field is
/// stubbed out.
fn word_filler_content(english: &str) -> Word {
    Word {
        traditional: "N/A".to_string(),
        simplified: "N/A".to_string(),
        pinyin: "N/A".to_string(),
        english: english.to_string(),
        english_alternate_choices: Vec::new(),
        usage_notes: String::new(),
        part_of_speech: String::new(),
    }
}

/// A pool entry works as a decoy if it reads differently from the target in
/// every field and its traditional form is at most two characters longer
/// (keeps the options visually comparable).
fn qualifies_as_decoy(option: &Word, target: &Word) -> bool {
    option.english != target.english
        && option.pinyin != target.pinyin
        && option.simplified != target.simplified
        && option.traditional != target.traditional
        && option.traditional.chars().count() <= target.traditional.chars().count() + 2
}

/// Derive shuffled multiple choice options for a word using the thread RNG.
///
/// See [`sample_choices_with_rng`].
pub fn sample_choices(
    target: &Word,
    pool: &[Word],
    mode: MultipleChoiceMode,
) -> Result<Vec<Word>, ChoiceError> {
    sample_choices_with_rng(target, pool, mode, &mut rand::rng())
}

/// Derive shuffled multiple choice options given a word and the flattened
/// language content.
///
/// Always returns exactly [`CHOICE_COUNT`] options including the target
/// itself, in shuffled order. English mode requires the target to carry at
/// least three alternate translations; the pool modes require at least three
/// pool entries that qualify as decoys. Either shortfall fails up front with
/// a [`ChoiceError`] instead of spinning on a draw that can never complete.
pub fn sample_choices_with_rng(
    target: &Word,
    pool: &[Word],
    mode: MultipleChoiceMode,
    rng: &mut impl Rng,
) -> Result<Vec<Word>, ChoiceError> {
    let mut choices = match mode {
        MultipleChoiceMode::English => {
            if target.english_alternate_choices.len() < DECOYS_NEEDED {
                return Err(ChoiceError::InsufficientAlternates {
                    traditional: target.traditional.clone(),
                    available: target.english_alternate_choices.len(),
                    needed: DECOYS_NEEDED,
                });
            }

            let mut alternates = target.english_alternate_choices.clone();
            knuth_shuffle(&mut alternates, rng);

            let mut choices = vec![target.clone()];
            choices.extend(
                alternates
                    .iter()
                    .take(DECOYS_NEEDED)
                    .map(|english| word_filler_content(english)),
            );
            choices
        }
        MultipleChoiceMode::Mandarin | MultipleChoiceMode::MandarinPronunciation => {
            let qualifying = pool
                .iter()
                .filter(|option| qualifies_as_decoy(option, target))
                .count();
            if qualifying < DECOYS_NEEDED {
                return Err(ChoiceError::InsufficientCandidates {
                    traditional: target.traditional.clone(),
                    available: qualifying,
                    needed: DECOYS_NEEDED,
                });
            }

            let mut chosen: HashSet<usize> = HashSet::new();
            let mut choices = vec![target.clone()];

            while choices.len() < CHOICE_COUNT {
                let idx = random_in_range(rng, 0, pool.len() as i64) as usize;
                let option = &pool[idx];

                if !chosen.contains(&idx) && qualifies_as_decoy(option, target) {
                    chosen.insert(idx);
                    choices.push(option.clone());
                }
            }

            choices
        }
    };

    knuth_shuffle(&mut choices, rng);
    Ok(choices)
}
