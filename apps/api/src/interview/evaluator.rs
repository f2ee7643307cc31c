//! Evaluator: one completion call over the whole transcript.

use tracing::info;

use crate::interview::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::interview::session::TranscriptSection;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{CompletionService, LlmError};

/// Plain-text transcript sent to the evaluator.
pub fn format_transcript(sections: &[TranscriptSection]) -> String {
    let mut text = String::new();
    for section in sections {
        text.push_str(&format!("\n{}:\n", section.label));
        for (question, answer) in &section.exchanges {
            text.push_str(&format!("Q: {question}\nA: {answer}\n"));
        }
    }
    text
}

/// Returns the evaluation text exactly as the completion service produced it.
pub async fn evaluate(
    completion: &dyn CompletionService,
    candidate_name: &str,
    transcript_text: &str,
) -> Result<String, LlmError> {
    let prompt = fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[("name", candidate_name), ("interview_text", transcript_text)],
    );
    let evaluation = completion.complete(&prompt).await?;
    info!(
        "Evaluation received for '{}' ({} chars)",
        candidate_name,
        evaluation.len()
    );
    Ok(evaluation)
}
