//! Interview Session: the externally-owned state record and its event transitions.
//!
//! `apply` is pure: it takes the current session and an event and returns the next
//! session. Everything that needs the completion service (fetching a section's
//! questions, evaluating, writing the report) lives in `engine` and runs after the
//! transition has been committed.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use crate::interview::catalog::Catalog;
use crate::interview::InterviewError;

/// Discrete inputs that move a session forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    NameSubmitted(String),
    AnswerSubmitted(String),
    ResetRequested,
}

impl SessionEvent {
    fn kind(&self) -> &'static str {
        match self {
            SessionEvent::NameSubmitted(_) => "name_submitted",
            SessionEvent::AnswerSubmitted(_) => "answer_submitted",
            SessionEvent::ResetRequested => "reset_requested",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    AwaitingName,
    InSection {
        section: usize,
        question_index: usize,
    },
    Evaluating,
    Complete,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingName => "awaiting_name",
            Phase::InSection { .. } => "in_section",
            Phase::Evaluating => "evaluating",
            Phase::Complete => "complete",
        }
    }
}

/// One section of the transcript: its label and the positional Q/A pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSection {
    pub label: String,
    pub exchanges: Vec<(String, String)>,
}

/// Everything one interview accumulates. Lives only in process memory.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub(super) id: Uuid,
    pub(super) candidate_name: Option<String>,
    pub(super) phase: Phase,
    /// Questions per section key, present once the section has been fetched.
    pub(super) questions: HashMap<String, Vec<String>>,
    pub(super) answers: HashMap<String, Vec<String>>,
    pub(super) total_asked: usize,
    pub(super) asked: HashSet<String>,
    pub(super) evaluation: Option<String>,
    pub(super) report_path: Option<PathBuf>,
    pub(super) report_error: Option<String>,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            candidate_name: None,
            phase: Phase::AwaitingName,
            questions: HashMap::new(),
            answers: HashMap::new(),
            total_asked: 0,
            asked: HashSet::new(),
            evaluation: None,
            report_path: None,
            report_error: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn candidate_name(&self) -> Option<&str> {
        self.candidate_name.as_deref()
    }

    pub fn total_asked(&self) -> usize {
        self.total_asked
    }

    pub fn evaluation(&self) -> Option<&str> {
        self.evaluation.as_deref()
    }

    pub fn report_path(&self) -> Option<&PathBuf> {
        self.report_path.as_ref()
    }

    pub fn report_error(&self) -> Option<&str> {
        self.report_error.as_deref()
    }

    pub fn questions_for(&self, key: &str) -> Option<&[String]> {
        self.questions.get(key).map(Vec::as_slice)
    }

    pub fn answers_for(&self, key: &str) -> Option<&[String]> {
        self.answers.get(key).map(Vec::as_slice)
    }

    pub fn has_asked(&self, question: &str) -> bool {
        self.asked.contains(question)
    }

    /// Fraction of the question budget used, in `[0, 1]`.
    pub fn progress(&self, catalog: &Catalog) -> f64 {
        if catalog.max_questions == 0 {
            return 1.0;
        }
        (self.total_asked as f64 / catalog.max_questions as f64).min(1.0)
    }

    /// The question currently waiting for an answer, if any.
    pub fn current_question<'a>(&'a self, catalog: &Catalog) -> Option<&'a str> {
        let Phase::InSection {
            section,
            question_index,
        } = self.phase
        else {
            return None;
        };
        let key = &catalog.section(section)?.key;
        self.questions
            .get(key)?
            .get(question_index)
            .map(String::as_str)
    }

    pub fn budget_exhausted(&self, catalog: &Catalog) -> bool {
        self.total_asked >= catalog.max_questions
    }

    /// Computes the session that results from `event`.
    ///
    /// Empty (or whitespace-only) names and answers leave the session unchanged.
    /// Events that make no sense in the current phase are rejected.
    pub fn apply(&self, event: &SessionEvent, catalog: &Catalog) -> Result<Self, InterviewError> {
        match (event, self.phase) {
            (SessionEvent::ResetRequested, _) => Ok(Self::new()),

            (SessionEvent::NameSubmitted(name), Phase::AwaitingName) => {
                let name = name.trim();
                let mut next = self.clone();
                if name.is_empty() {
                    return Ok(next);
                }
                next.candidate_name = Some(name.to_string());
                next.phase = if catalog.sections.is_empty() || next.budget_exhausted(catalog) {
                    Phase::Evaluating
                } else {
                    Phase::InSection {
                        section: 0,
                        question_index: 0,
                    }
                };
                Ok(next)
            }

            (
                SessionEvent::AnswerSubmitted(answer),
                Phase::InSection {
                    section,
                    question_index,
                },
            ) => {
                let answer = answer.trim();
                if answer.is_empty() {
                    return Ok(self.clone());
                }
                let question = self
                    .current_question(catalog)
                    .ok_or_else(|| InterviewError::QuestionsNotReady {
                        section: catalog
                            .section(section)
                            .map(|s| s.label.clone())
                            .unwrap_or_default(),
                    })?
                    .to_string();
                let key = catalog
                    .section(section)
                    .map(|s| s.key.clone())
                    .unwrap_or_default();

                let mut next = self.clone();
                next.answers
                    .entry(key.clone())
                    .or_default()
                    .push(answer.to_string());
                next.asked.insert(question);
                next.total_asked += 1;

                let question_index = question_index + 1;
                let section_len = next.questions.get(&key).map_or(0, Vec::len);

                next.phase = if next.budget_exhausted(catalog) {
                    Phase::Evaluating
                } else if question_index >= section_len {
                    next.phase_after_section(section, catalog)
                } else {
                    Phase::InSection {
                        section,
                        question_index,
                    }
                };
                Ok(next)
            }

            (event, phase) => Err(InterviewError::InvalidTransition {
                event: event.kind(),
                phase: phase.name(),
            }),
        }
    }

    /// Where a session goes once `section` has run out of questions.
    pub(super) fn phase_after_section(&self, section: usize, catalog: &Catalog) -> Phase {
        match catalog.next_after(section) {
            Some(next) if !self.budget_exhausted(catalog) => Phase::InSection {
                section: next,
                question_index: 0,
            },
            _ => Phase::Evaluating,
        }
    }

    /// Stores a freshly fetched batch for `key`: questions already asked and repeats
    /// within the batch are dropped, then the list is cut to the per-section cap.
    pub(super) fn store_questions(&mut self, key: &str, fetched: Vec<String>, cap: usize) {
        let mut seen = HashSet::new();
        let questions: Vec<String> = fetched
            .into_iter()
            .filter(|q| !self.has_asked(q) && seen.insert(q.clone()))
            .take(cap)
            .collect();
        self.questions.insert(key.to_string(), questions);
        self.answers.insert(key.to_string(), Vec::new());
    }

    /// Sections with fetched questions, in catalog order, as positional Q/A pairs.
    pub fn transcript(&self, catalog: &Catalog) -> Vec<TranscriptSection> {
        catalog
            .sections
            .iter()
            .filter_map(|spec| {
                let questions = self.questions_for(&spec.key)?;
                let answers = self.answers_for(&spec.key).unwrap_or(&[]);
                Some(TranscriptSection {
                    label: spec.label.clone(),
                    exchanges: questions
                        .iter()
                        .zip(answers)
                        .map(|(q, a)| (q.clone(), a.clone()))
                        .collect(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(&[("a", "Alpha"), ("b", "Beta")], 2, 3)
    }

    fn named(catalog: &Catalog) -> InterviewSession {
        InterviewSession::new()
            .apply(&SessionEvent::NameSubmitted("Ann".to_string()), catalog)
            .unwrap()
    }

    fn answer(session: &InterviewSession, catalog: &Catalog, text: &str) -> InterviewSession {
        session
            .apply(&SessionEvent::AnswerSubmitted(text.to_string()), catalog)
            .unwrap()
    }

    #[test]
    fn test_whitespace_name_keeps_awaiting_name() {
        let catalog = catalog();
        let session = InterviewSession::new();

        let next = session
            .apply(&SessionEvent::NameSubmitted("  ".to_string()), &catalog)
            .unwrap();

        assert_eq!(next.phase(), Phase::AwaitingName);
        assert_eq!(next.candidate_name(), None);
    }

    #[test]
    fn test_name_is_trimmed_and_starts_first_section() {
        let catalog = catalog();
        let session = InterviewSession::new()
            .apply(&SessionEvent::NameSubmitted("  Ann Lee ".to_string()), &catalog)
            .unwrap();

        assert_eq!(session.candidate_name(), Some("Ann Lee"));
        assert_eq!(
            session.phase(),
            Phase::InSection {
                section: 0,
                question_index: 0
            }
        );
    }

    #[test]
    fn test_zero_budget_goes_straight_to_evaluating() {
        let catalog = Catalog::new(&[("a", "Alpha")], 2, 0);
        let session = named(&catalog);

        assert_eq!(session.phase(), Phase::Evaluating);
        assert_eq!(session.progress(&catalog), 1.0);
    }

    #[test]
    fn test_empty_catalog_goes_straight_to_evaluating() {
        let catalog = Catalog::new(&[], 2, 5);
        assert_eq!(named(&catalog).phase(), Phase::Evaluating);
    }

    #[test]
    fn test_answer_before_questions_are_fetched_is_rejected() {
        let catalog = catalog();
        let session = named(&catalog);

        let result = session.apply(&SessionEvent::AnswerSubmitted("hi".to_string()), &catalog);

        assert!(matches!(
            result,
            Err(InterviewError::QuestionsNotReady { ref section }) if section == "Alpha"
        ));
    }

    #[test]
    fn test_answer_while_awaiting_name_is_invalid() {
        let catalog = catalog();
        let result = InterviewSession::new()
            .apply(&SessionEvent::AnswerSubmitted("hi".to_string()), &catalog);

        assert!(matches!(
            result,
            Err(InterviewError::InvalidTransition {
                event: "answer_submitted",
                phase: "awaiting_name"
            })
        ));
    }

    #[test]
    fn test_name_after_start_is_invalid() {
        let catalog = catalog();
        let result = named(&catalog).apply(&SessionEvent::NameSubmitted("Bob".to_string()), &catalog);
        assert!(matches!(result, Err(InterviewError::InvalidTransition { .. })));
    }

    #[test]
    fn test_empty_answer_changes_nothing() {
        let catalog = catalog();
        let mut session = named(&catalog);
        session.store_questions("a", vec!["Q1".into(), "Q2".into()], 2);

        let next = answer(&session, &catalog, "   ");

        assert_eq!(next.phase(), session.phase());
        assert_eq!(next.total_asked(), 0);
        assert_eq!(next.answers_for("a"), Some(&[][..]));
    }

    #[test]
    fn test_section_rolls_over_then_budget_stops_mid_section() {
        let catalog = catalog();
        let mut session = named(&catalog);
        session.store_questions("a", vec!["A1".into(), "A2".into()], 2);

        session = answer(&session, &catalog, "first");
        assert_eq!(session.current_question(&catalog), Some("A2"));
        session = answer(&session, &catalog, "second");
        assert_eq!(
            session.phase(),
            Phase::InSection {
                section: 1,
                question_index: 0
            }
        );

        session.store_questions("b", vec!["B1".into(), "B2".into()], 2);
        session = answer(&session, &catalog, "third");

        assert_eq!(session.phase(), Phase::Evaluating);
        assert_eq!(session.total_asked(), 3);
        assert_eq!(session.answers_for("b").map(<[String]>::len), Some(1));
        assert_eq!(session.progress(&catalog), 1.0);
    }

    #[test]
    fn test_last_section_complete_goes_to_evaluating() {
        let catalog = Catalog::new(&[("a", "Alpha")], 2, 10);
        let mut session = named(&catalog);
        session.store_questions("a", vec!["A1".into()], 2);

        session = answer(&session, &catalog, "only");

        assert_eq!(session.phase(), Phase::Evaluating);
        assert_eq!(
            session.questions_for("a").map(<[String]>::len),
            session.answers_for("a").map(<[String]>::len)
        );
    }

    #[test]
    fn test_store_questions_filters_asked_and_repeats() {
        let catalog = catalog();
        let mut session = named(&catalog);
        session.store_questions("a", vec!["Shared?".into(), "A2".into()], 2);
        session = answer(&session, &catalog, "x");

        session.store_questions(
            "b",
            vec!["Shared?".into(), "Dup?".into(), "Dup?".into(), "B3".into()],
            2,
        );

        assert_eq!(
            session.questions_for("b"),
            Some(&["Dup?".to_string(), "B3".to_string()][..])
        );
    }

    #[test]
    fn test_transcript_follows_catalog_order_and_zips_positionally() {
        let catalog = catalog();
        let mut session = named(&catalog);
        session.store_questions("b", vec!["B1".into()], 2);
        session.store_questions("a", vec!["A1".into(), "A2".into()], 2);
        session = answer(&session, &catalog, "ans-a1");

        let transcript = session.transcript(&catalog);

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].label, "Alpha");
        assert_eq!(
            transcript[0].exchanges,
            vec![("A1".to_string(), "ans-a1".to_string())]
        );
        assert_eq!(transcript[1].label, "Beta");
        assert!(transcript[1].exchanges.is_empty());
    }

    #[test]
    fn test_reset_returns_fresh_session() {
        let catalog = catalog();
        let session = named(&catalog);

        let reset = session.apply(&SessionEvent::ResetRequested, &catalog).unwrap();

        assert_eq!(reset.phase(), Phase::AwaitingName);
        assert_eq!(reset.candidate_name(), None);
        assert_ne!(reset.id(), session.id());
    }
}
