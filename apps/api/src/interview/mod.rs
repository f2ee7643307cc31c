// Interview engine: session state machine, question source, evaluator, report writer.
// All completion calls go through llm_client::CompletionService.

use thiserror::Error;

use crate::llm_client::LlmError;

pub mod catalog;
pub mod engine;
pub mod evaluator;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod report;
pub mod session;

#[cfg(test)]
pub mod test_support;

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Completion service failed: {0}")]
    Completion(#[from] LlmError),

    #[error("Cannot apply {event} while the session is {phase}")]
    InvalidTransition {
        event: &'static str,
        phase: &'static str,
    },

    #[error("Questions for section '{section}' are not available yet")]
    QuestionsNotReady { section: String },
}
