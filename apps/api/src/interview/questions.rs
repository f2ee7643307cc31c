//! Question Source: asks the completion service for a section's questions and
//! parses the numbered lines out of the reply.

use tracing::{debug, info};

use crate::interview::prompts::QUESTIONS_PROMPT_TEMPLATE;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{CompletionService, LlmError};

/// Ordinals accepted as question numbers.
const ORDINALS: [char; 3] = ['1', '2', '3'];

/// Requests questions for one section and returns at most `cap` of them.
///
/// A reply with no well-formed numbered lines yields an empty list, not an error.
pub async fn questions_for(
    completion: &dyn CompletionService,
    section_label: &str,
    cap: usize,
) -> Result<Vec<String>, LlmError> {
    let prompt = fill_template(QUESTIONS_PROMPT_TEMPLATE, &[("section", section_label)]);
    let raw = completion.complete(&prompt).await?;

    let questions = parse_numbered_questions(&raw, cap);
    info!(
        "Received {} question(s) for section '{}'",
        questions.len(),
        section_label
    );
    if questions.is_empty() {
        debug!("No numbered lines in completion output: {:?}", raw);
    }

    Ok(questions)
}

/// Keeps lines shaped like `1. text`, `2. text` or `3. text` (after trimming),
/// with the marker stripped, up to `cap` entries.
pub fn parse_numbered_questions(raw: &str, cap: usize) -> Vec<String> {
    raw.lines()
        .filter_map(|line| strip_ordinal(line.trim()))
        .map(str::to_string)
        .take(cap)
        .collect()
}

fn strip_ordinal(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let digit = chars.next()?;
    if !ORDINALS.contains(&digit) {
        return None;
    }
    let text = chars.as_str().strip_prefix('.')?.trim_start();
    (!text.is_empty()).then_some(text)
}
