//! Wizard controller — cursor navigation over the question catalog.

use std::time::Duration;

use crate::catalog::{QuestionDescriptor, QuestionKind, survey_catalog};
use crate::store::{Answer, ResponseStore};

/// Delay before an auto-committed answer advances the wizard, long
/// enough for the participant to perceive the selection.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);

/// Side effect requested by a navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEffect {
    /// The cursor moved; the front-end should scroll to the top.
    ScrollToTop,
    /// Nothing happened (boundary, or consent not given).
    None,
}

/// How to proceed after an answer was recorded.
///
/// Single-choice (without "other") and Likert answers are atomic and
/// low-risk, so they auto-commit after a short delay. Free-text and
/// multi-select input is commonly partial and requires an explicit
/// continue action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvancePolicy {
    /// Advance after the given delay, without explicit confirmation.
    Auto(Duration),
    /// Wait for an explicit continue action.
    Manual,
}

/// One survey session: the catalog, a cursor into it, and the
/// session's response store.
#[derive(Debug)]
pub struct WizardController {
    catalog: Vec<QuestionDescriptor>,
    cursor: usize,
    store: ResponseStore,
}

impl WizardController {
    pub fn new() -> Self {
        Self::with_catalog(survey_catalog())
    }

    /// Build a controller over an explicit catalog.
    ///
    /// The catalog must be non-empty; `new` always satisfies this.
    pub fn with_catalog(catalog: Vec<QuestionDescriptor>) -> Self {
        assert!(!catalog.is_empty(), "catalog must not be empty");
        Self {
            catalog,
            cursor: 0,
            store: ResponseStore::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn catalog(&self) -> &[QuestionDescriptor] {
        &self.catalog
    }

    /// The descriptor under the cursor. Always defined: the cursor
    /// never leaves `0..catalog.len()`.
    pub fn current_question(&self) -> &QuestionDescriptor {
        &self.catalog[self.cursor]
    }

    /// Completion fraction in [0, 1], for display only.
    pub fn progress_fraction(&self) -> f64 {
        if self.catalog.len() < 2 {
            return 1.0;
        }
        self.cursor as f64 / (self.catalog.len() - 1) as f64
    }

    /// Move forward one screen. No-op at the last screen, and blocked
    /// on the welcome screen until consent is given.
    pub fn advance(&mut self) -> NavEffect {
        if self.current_question().kind == QuestionKind::Welcome && !self.store.consent() {
            return NavEffect::None;
        }
        if self.cursor + 1 >= self.catalog.len() {
            return NavEffect::None;
        }
        self.cursor += 1;
        NavEffect::ScrollToTop
    }

    /// Move back one screen. No-op at the welcome screen.
    pub fn retreat(&mut self) -> NavEffect {
        if self.cursor == 0 {
            return NavEffect::None;
        }
        self.cursor -= 1;
        NavEffect::ScrollToTop
    }

    /// Record an answer for the current question and report whether
    /// the wizard should auto-advance.
    pub fn record_answer(&mut self, answer: Answer) -> AdvancePolicy {
        let question = self.current_question();
        let entry = question.entry_index;
        let policy = match question.kind {
            QuestionKind::Choice if !question.allow_other => AdvancePolicy::Auto(AUTO_ADVANCE_DELAY),
            QuestionKind::Likert => AdvancePolicy::Auto(AUTO_ADVANCE_DELAY),
            _ => AdvancePolicy::Manual,
        };
        self.store.set_answer(entry, answer);
        policy
    }

    /// Toggle one option of the current multi-select question.
    pub fn toggle_current_multi(&mut self, option: &str) {
        let entry = self.current_question().entry_index;
        self.store.toggle_multi(entry, option);
    }

    /// Whether the explicit continue action is available. Free-text
    /// and choice-with-other screens require a non-empty answer;
    /// the welcome screen requires consent.
    pub fn can_continue(&self) -> bool {
        let question = self.current_question();
        match question.kind {
            QuestionKind::Welcome => self.store.consent(),
            QuestionKind::Text => self
                .store
                .answer(question.entry_index)
                .is_some_and(|a| !a.is_empty()),
            QuestionKind::Choice if question.allow_other => self
                .store
                .answer(question.entry_index)
                .is_some_and(|a| !a.is_empty()),
            _ => true,
        }
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.store.set_consent(consent);
    }

    pub fn store(&self) -> &ResponseStore {
        &self.store
    }

    /// Discard the session: cursor back to the welcome screen, store
    /// replaced by a fresh one.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.store = ResponseStore::new();
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ENTRY_COUNT;

    fn consented() -> WizardController {
        let mut wizard = WizardController::new();
        wizard.set_consent(true);
        wizard
    }

    #[test]
    fn test_consent_gates_advance_from_welcome() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.advance(), NavEffect::None);
        assert_eq!(wizard.cursor(), 0);

        wizard.set_consent(true);
        assert_eq!(wizard.advance(), NavEffect::ScrollToTop);
        assert_eq!(wizard.cursor(), 1);
    }

    #[test]
    fn test_advance_then_retreat_is_identity() {
        let mut wizard = consented();
        wizard.advance();
        wizard.advance();
        let before = wizard.cursor();
        assert_eq!(wizard.advance(), NavEffect::ScrollToTop);
        assert_eq!(wizard.retreat(), NavEffect::ScrollToTop);
        assert_eq!(wizard.cursor(), before);
    }

    #[test]
    fn test_navigation_no_ops_at_bounds() {
        let mut wizard = consented();
        assert_eq!(wizard.retreat(), NavEffect::None);
        assert_eq!(wizard.cursor(), 0);

        for _ in 0..wizard.catalog().len() {
            wizard.advance();
        }
        assert_eq!(wizard.cursor(), ENTRY_COUNT);
        assert_eq!(wizard.advance(), NavEffect::None);
        assert_eq!(wizard.cursor(), ENTRY_COUNT);
    }

    #[test]
    fn test_progress_fraction_ends() {
        let mut wizard = consented();
        assert_eq!(wizard.progress_fraction(), 0.0);
        for _ in 0..wizard.catalog().len() {
            wizard.advance();
        }
        assert_eq!(wizard.progress_fraction(), 1.0);
    }

    #[test]
    fn test_auto_advance_policy_by_kind() {
        let mut wizard = consented();

        // Slot 1: plain choice — auto.
        wizard.advance();
        assert_eq!(
            wizard.record_answer(Answer::single("21-23")),
            AdvancePolicy::Auto(AUTO_ADVANCE_DELAY)
        );

        // Slot 3: choice with "other" — manual.
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.cursor(), 3);
        assert_eq!(
            wizard.record_answer(Answer::single("Diploma")),
            AdvancePolicy::Manual
        );

        // Slot 6: Likert — auto.
        while wizard.cursor() < 6 {
            wizard.advance();
        }
        assert_eq!(
            wizard.record_answer(Answer::single("4")),
            AdvancePolicy::Auto(AUTO_ADVANCE_DELAY)
        );
    }

    #[test]
    fn test_text_requires_non_empty_answer_to_continue() {
        let mut wizard = consented();
        while wizard.current_question().kind != QuestionKind::Text {
            wizard.advance();
        }
        assert!(!wizard.can_continue());
        wizard.record_answer(Answer::single(""));
        assert!(!wizard.can_continue());
        wizard.record_answer(Answer::single("It shapes how I present myself."));
        assert!(wizard.can_continue());
    }

    #[test]
    fn test_choice_with_other_requires_non_empty_answer_to_continue() {
        let mut wizard = consented();
        // Slot 3 (academic level) allows a free-form "other" answer.
        while wizard.cursor() < 3 {
            wizard.advance();
        }
        assert!(wizard.current_question().allow_other);
        assert!(!wizard.can_continue());

        wizard.record_answer(Answer::single(""));
        assert!(!wizard.can_continue());

        wizard.record_answer(Answer::single("Diploma"));
        assert!(wizard.can_continue());

        // A regular option also satisfies the gate.
        wizard.record_answer(Answer::single("Undergraduate"));
        assert!(wizard.can_continue());
    }

    #[test]
    fn test_toggle_current_multi_targets_current_slot() {
        let mut wizard = consented();
        while wizard.current_question().kind != QuestionKind::Multi {
            wizard.advance();
        }
        assert_eq!(wizard.cursor(), 39);
        wizard.toggle_current_multi("Reading");
        wizard.toggle_current_multi("Journaling");
        assert_eq!(
            wizard.store().answer(39),
            Some(&Answer::multi(["Reading", "Journaling"]))
        );
    }

    #[test]
    fn test_reset_discards_session() {
        let mut wizard = consented();
        wizard.advance();
        wizard.record_answer(Answer::single("21-23"));
        wizard.reset();
        assert_eq!(wizard.cursor(), 0);
        assert!(wizard.store().answer(1).is_none());
        assert!(!wizard.store().consent());
    }
}
