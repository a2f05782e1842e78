//! Response store — the in-memory answers of one survey session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A recorded answer value.
///
/// Absence is represented by the store not containing the slot at all;
/// callers render a missing answer as an empty input, never as an
/// empty-string sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// Choice, Likert and free-text answers.
    Single(String),
    /// Multi-select answers, in insertion order.
    Multi(Vec<String>),
}

impl Answer {
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Multi(items) => Some(items),
        }
    }

    /// True for an empty string or an empty selection list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Multi(items) => items.is_empty(),
        }
    }
}

/// Answers keyed by external field slot, plus the consent flag.
///
/// Exclusively owned by one wizard session; created empty, read (never
/// cleared) by the dispatcher and exporter, discarded on reset.
#[derive(Debug, Clone, Default)]
pub struct ResponseStore {
    answers: HashMap<usize, Answer>,
    consent: bool,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for a slot, overwriting any existing value.
    pub fn set_answer(&mut self, entry: usize, answer: Answer) {
        self.answers.insert(entry, answer);
    }

    /// Toggle one option in a multi-select answer: adds it if absent,
    /// removes it if present, preserving insertion order otherwise.
    /// A non-list value at the slot is replaced by a fresh list.
    pub fn toggle_multi(&mut self, entry: usize, option: &str) {
        match self.answers.get_mut(&entry) {
            Some(Answer::Multi(items)) => {
                if let Some(pos) = items.iter().position(|i| i == option) {
                    items.remove(pos);
                } else {
                    items.push(option.to_string());
                }
            }
            _ => {
                self.answers.insert(entry, Answer::multi([option]));
            }
        }
    }

    /// The stored answer for a slot, if any.
    pub fn answer(&self, entry: usize) -> Option<&Answer> {
        self.answers.get(&entry)
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.consent = consent;
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    /// Number of answered slots.
    pub fn answered(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_answer_overwrites() {
        let mut store = ResponseStore::new();
        store.set_answer(7, Answer::single("A"));
        store.set_answer(7, Answer::single("B"));
        assert!(matches!(store.answer(7), Some(Answer::Single(s)) if s == "B"));
    }

    #[test]
    fn test_absent_answer_is_none() {
        let store = ResponseStore::new();
        assert!(store.answer(1).is_none());
    }

    #[test]
    fn test_toggle_multi_is_self_inverse() {
        let mut store = ResponseStore::new();
        store.set_answer(39, Answer::multi(["Reading", "Journaling"]));
        store.toggle_multi(39, "Exercise/Outdoor activities");
        store.toggle_multi(39, "Exercise/Outdoor activities");
        assert_eq!(
            store.answer(39),
            Some(&Answer::multi(["Reading", "Journaling"]))
        );
    }

    #[test]
    fn test_toggle_multi_preserves_order() {
        let mut store = ResponseStore::new();
        store.toggle_multi(39, "Reading");
        store.toggle_multi(39, "Journaling");
        store.toggle_multi(39, "Meditation/Mindfulness");
        store.toggle_multi(39, "Journaling");
        assert_eq!(
            store.answer(39),
            Some(&Answer::multi(["Reading", "Meditation/Mindfulness"]))
        );
    }

    #[test]
    fn test_toggle_multi_replaces_single_value() {
        let mut store = ResponseStore::new();
        store.set_answer(39, Answer::single("oops"));
        store.toggle_multi(39, "Reading");
        assert_eq!(store.answer(39), Some(&Answer::multi(["Reading"])));
    }

    #[test]
    fn test_consent_flag() {
        let mut store = ResponseStore::new();
        assert!(!store.consent());
        store.set_consent(true);
        assert!(store.consent());
    }
}
