//! Bonus-topic enrichment for sentence generation.
//!
//! Certain vocabulary words, when selected, pull an extra topic phrase into
//! the generation request so the service produces livelier sentences.  The
//! mapping is a plain declarative table: swap it for
//! [`TopicTable::disabled`] and the affordance vanishes without touching the
//! state machine.

// ---------------------------------------------------------------------------
// TopicTable
// ---------------------------------------------------------------------------

/// Declarative `trigger word → bonus phrase` lookup applied to the word set
/// just before a sentence-generation call.
///
/// Enrichment is strictly additive: phrases are appended after the user's
/// selected words and never replace or remove them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTable {
    entries: Vec<(String, String)>,
}

impl TopicTable {
    /// Build a table from `(trigger, phrase)` pairs.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(trigger, phrase)| (trigger.into(), phrase.into()))
                .collect(),
        }
    }

    /// The empty table — enrichment off.
    pub fn disabled() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// `true` when the table holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the bonus phrase of every trigger present in `words`.
    ///
    /// Matching is exact on the word text.  A phrase is appended at most
    /// once, and never when it is already in the list.
    pub fn enrich(&self, words: &mut Vec<String>) {
        for (trigger, phrase) in &self.entries {
            let triggered = words.iter().any(|word| word == trigger);
            if triggered && !words.iter().any(|word| word == phrase) {
                log::debug!("topics: \"{trigger}\" adds \"{phrase}\" to the word set");
                words.push(phrase.clone());
            }
        }
    }
}

/// Demo table matching the app's stock scene prompts.
impl Default for TopicTable {
    fn default() -> Self {
        Self::new([
            ("bench", "a quiet afternoon in the park"),
            ("coffee", "ordering at a busy cafe"),
            ("train", "catching the morning commute"),
        ])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn trigger_appends_its_phrase() {
        let table = TopicTable::new([("bench", "a quiet afternoon in the park")]);
        let mut set = words(&["bench", "tree"]);

        table.enrich(&mut set);

        assert_eq!(
            set,
            words(&["bench", "tree", "a quiet afternoon in the park"])
        );
    }

    #[test]
    fn enrichment_never_removes_user_selections() {
        let table = TopicTable::default();
        let mut set = words(&["bench", "coffee", "kite"]);
        let original = set.clone();

        table.enrich(&mut set);

        assert!(set.starts_with(&original));
        assert!(set.len() > original.len());
    }

    #[test]
    fn absent_trigger_changes_nothing() {
        let table = TopicTable::new([("bench", "a quiet afternoon in the park")]);
        let mut set = words(&["tree", "pond"]);

        table.enrich(&mut set);

        assert_eq!(set, words(&["tree", "pond"]));
    }

    #[test]
    fn phrase_is_not_duplicated() {
        let table = TopicTable::new([
            ("bench", "park life"),
            ("swing", "park life"),
        ]);
        let mut set = words(&["bench", "swing"]);

        table.enrich(&mut set);

        assert_eq!(set, words(&["bench", "swing", "park life"]));
    }

    #[test]
    fn disabled_table_is_a_noop() {
        let table = TopicTable::disabled();
        assert!(table.is_empty());

        let mut set = words(&["bench"]);
        table.enrich(&mut set);
        assert_eq!(set, words(&["bench"]));
    }

    #[test]
    fn matching_is_exact_on_word_text() {
        let table = TopicTable::new([("bench", "park life")]);
        let mut set = words(&["Bench", "benches"]);

        table.enrich(&mut set);

        assert_eq!(set, words(&["Bench", "benches"]));
    }
}
