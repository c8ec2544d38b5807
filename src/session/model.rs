//! Session data model — vocabulary, word selection and practice attempts.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// VocabularyEntry
// ---------------------------------------------------------------------------

/// One word extracted from the photographed scene.
///
/// Deserialised straight from the upload response; immutable once it enters
/// a session (selection state lives in [`WordSelection`], not here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// The word itself — unique key within a session's vocabulary.
    pub word: String,
    /// Short dictionary-style definition.
    pub definition: String,
    /// An example sentence using the word.
    pub example: String,
}

// ---------------------------------------------------------------------------
// PronunciationScore
// ---------------------------------------------------------------------------

/// Result of one pronunciation analysis.
///
/// Score and feedback arrive together from the service and are stored
/// together, so an attempt is never half-scored.
#[derive(Debug, Clone, PartialEq)]
pub struct PronunciationScore {
    /// How closely the recording matched the sentence, 0–100.
    pub percent: f32,
    /// Free-text coaching feedback paired with the score.
    pub feedback: String,
}

// ---------------------------------------------------------------------------
// PracticeAttempt
// ---------------------------------------------------------------------------

/// One generated sentence and, eventually, its pronunciation score.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeAttempt {
    /// Sentence text returned by the generation endpoint.
    pub sentence: String,
    /// Vocabulary words the sentence exercises.  Tapping the attempt later
    /// re-selects these words for the next generation round.
    pub used_vocabulary: Vec<String>,
    /// `None` until a pronunciation analysis for this sentence completes.
    pub score: Option<PronunciationScore>,
}

impl PracticeAttempt {
    /// A freshly generated attempt with no score yet.
    pub fn unscored(sentence: String, used_vocabulary: Vec<String>) -> Self {
        Self {
            sentence,
            used_vocabulary,
            score: None,
        }
    }

    /// `true` once a pronunciation analysis has been recorded.
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

// ---------------------------------------------------------------------------
// WordSelection
// ---------------------------------------------------------------------------

/// Ordered word → selected map over a session's vocabulary.
///
/// The map is a *total function* over the vocabulary words: every word is
/// present from construction (initially unselected), and no operation can
/// add or remove keys.  Toggling or selecting a word the vocabulary never
/// contained is a no-op.  Iteration order is vocabulary order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSelection {
    entries: Vec<(String, bool)>,
}

impl WordSelection {
    /// Build the selection map for `vocabulary`, every word unselected.
    ///
    /// Duplicate words are dropped keeping the first occurrence, so the keys
    /// stay unique.
    pub fn from_vocabulary(vocabulary: &[VocabularyEntry]) -> Self {
        let mut entries: Vec<(String, bool)> = Vec::with_capacity(vocabulary.len());
        for entry in vocabulary {
            if !entries.iter().any(|(word, _)| word == &entry.word) {
                entries.push((entry.word.clone(), false));
            }
        }
        Self { entries }
    }

    /// Flip the selected flag for `word`.  Returns `false` (and changes
    /// nothing) when the word is not part of the vocabulary.
    pub fn toggle(&mut self, word: &str) -> bool {
        match self.entries.iter_mut().find(|(w, _)| w == word) {
            Some((_, selected)) => {
                *selected = !*selected;
                true
            }
            None => false,
        }
    }

    /// Mark `word` as selected.  Unknown words are ignored.
    pub fn select(&mut self, word: &str) {
        if let Some((_, selected)) = self.entries.iter_mut().find(|(w, _)| w == word) {
            *selected = true;
        }
    }

    /// Whether `word` is currently selected; `None` for unknown words.
    pub fn is_selected(&self, word: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, selected)| *selected)
    }

    /// The selected words, sorted — the stable ordering sent to the
    /// sentence-generation endpoint.
    pub fn selected_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(word, _)| word.clone())
            .collect();
        words.sort();
        words
    }

    /// All words in vocabulary order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }

    /// Number of vocabulary words tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the vocabulary is empty (e.g. after a failed upload).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
