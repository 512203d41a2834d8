//! Word lookup dictionary built from the validated content.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::AnnotatedWord;

/// Lookup table over the whole content set, keyed by traditional form.
/// Iteration preserves lesson order.
#[derive(Debug, Clone, Default)]
pub struct WordDictionary {
    entries: IndexMap<String, AnnotatedWord>,
    simplified_to_traditional: HashMap<String, String>,
}

impl WordDictionary {
    /// Build the dictionary from a validated, flattened word list.
    ///
    /// The validator guarantees traditional forms are unique, so insertion
    /// never clobbers an earlier lesson's entry.
    pub fn from_words(words: &[AnnotatedWord]) -> Self {
        let mut entries = IndexMap::with_capacity(words.len());
        let mut simplified_to_traditional = HashMap::with_capacity(words.len());

        for entry in words {
            simplified_to_traditional.insert(
                entry.word.simplified.clone(),
                entry.word.traditional.clone(),
            );
            entries.insert(entry.word.traditional.clone(), entry.clone());
        }

        Self {
            entries,
            simplified_to_traditional,
        }
    }

    /// Look a word up by its traditional or simplified form.
    pub fn lookup(&self, characters: &str) -> Option<&AnnotatedWord> {
        self.entries.get(characters).or_else(|| {
            self.simplified_to_traditional
                .get(characters)
                .and_then(|traditional| self.entries.get(traditional))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in lesson order.
    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedWord> {
        self.entries.values()
    }
}
