//! Interviewer: applies session events and performs the I/O they imply.
//!
//! Flow: apply event (pure) → commit → settle:
//!   InSection  → fetch the section's questions once, skip sections left empty
//!   Evaluating → evaluate once, write the report, move to Complete
//!
//! Every step mutates the session only after its I/O has succeeded, so a failed
//! completion call leaves the session at the last committed step. Calling
//! `settle` again re-attempts from there.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::interview::catalog::Catalog;
use crate::interview::evaluator::{evaluate, format_transcript};
use crate::interview::questions::questions_for;
use crate::interview::report::ReportWriter;
use crate::interview::session::{InterviewSession, Phase, SessionEvent};
use crate::interview::InterviewError;
use crate::llm_client::CompletionService;

pub struct Interviewer {
    completion: Arc<dyn CompletionService>,
    catalog: Catalog,
    reports: ReportWriter,
}

impl Interviewer {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        catalog: Catalog,
        reports: ReportWriter,
    ) -> Self {
        Self {
            completion,
            catalog,
            reports,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Applies `event` and settles the session.
    ///
    /// An invalid event leaves the session untouched. If the event is accepted
    /// but a later completion call fails, the accepted event stays committed and
    /// the error is returned.
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    pub async fn handle(
        &self,
        session: &mut InterviewSession,
        event: SessionEvent,
    ) -> Result<(), InterviewError> {
        *session = session.apply(&event, &self.catalog)?;
        self.settle(session).await
    }

    /// Runs pending I/O until the session waits for input or is complete.
    /// Idempotent once the session is complete.
    pub async fn settle(&self, session: &mut InterviewSession) -> Result<(), InterviewError> {
        loop {
            match session.phase {
                Phase::AwaitingName | Phase::Complete => return Ok(()),

                Phase::InSection {
                    section,
                    question_index,
                } => {
                    if session.budget_exhausted(&self.catalog) {
                        session.phase = Phase::Evaluating;
                        continue;
                    }
                    let Some(spec) = self.catalog.section(section) else {
                        session.phase = Phase::Evaluating;
                        continue;
                    };

                    if session.questions_for(&spec.key).is_none() {
                        let fetched = questions_for(
                            self.completion.as_ref(),
                            &spec.label,
                            self.catalog.questions_per_section,
                        )
                        .await?;
                        session.store_questions(
                            &spec.key,
                            fetched,
                            self.catalog.questions_per_section,
                        );
                    }

                    let available = session.questions_for(&spec.key).map_or(0, <[String]>::len);
                    if question_index >= available {
                        warn!(
                            "Section '{}' has no questions left; moving on",
                            spec.label
                        );
                        session.phase = session.phase_after_section(section, &self.catalog);
                        continue;
                    }
                    return Ok(());
                }

                Phase::Evaluating => {
                    if session.evaluation.is_none() {
                        self.finish(session).await?;
                    }
                    session.phase = Phase::Complete;
                    return Ok(());
                }
            }
        }
    }

    async fn finish(&self, session: &mut InterviewSession) -> Result<(), InterviewError> {
        let name = session.candidate_name.clone().unwrap_or_default();
        let transcript = session.transcript(&self.catalog);

        info!(
            "Evaluating interview for '{}' ({} questions answered)",
            name, session.total_asked
        );
        let evaluation = evaluate(
            self.completion.as_ref(),
            &name,
            &format_transcript(&transcript),
        )
        .await?;

        match self
            .reports
            .write_report(&name, &transcript, &evaluation)
            .await
        {
            Ok(path) => session.report_path = Some(path),
            Err(e) => {
                warn!("Report not saved: {e}");
                session.report_error = Some(e.to_string());
            }
        }
        session.evaluation = Some(evaluation);
        Ok(())
    }
}
