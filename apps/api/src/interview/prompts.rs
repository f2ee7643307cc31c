// All prompt and text templates for the interview module.
// Placeholders are filled with llm_client::prompts::fill_template.

/// Shown while the session waits for the candidate's name.
pub const INITIAL_GREETING: &str = "Hello! I'm your AI interviewer. \
    Before we begin, could you please tell me your full name?";

/// Opens the chat history once the name is known. Replace `{name}`.
pub const WELCOME_TEMPLATE: &str = "Thank you, {name}! Let's begin the interview.";

pub const COMPLETION_MESSAGE: &str = "Interview Complete!";

/// Shown while a question fetch or the evaluation is waiting to be re-attempted.
pub const RETRY_PROMPT: &str = "The interviewer could not prepare the next step. \
    Send POST /api/v1/interview/continue to try again.";

/// Question generation prompt. Replace `{section}` with the section label.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are an experienced recruiter conducting a structured job interview.

Generate exactly 3 interview questions for the section: {section}

RULES:
1. Each question must be open-ended and answerable in a few sentences.
2. Questions must be distinct from each other.
3. Number the questions as "1.", "2.", "3.", one per line.
4. Return ONLY the numbered questions. No introduction or closing remarks."#;

/// Marker the evaluator is asked to end with; the report extracts what follows it.
pub const RECOMMENDATION_MARKER: &str = "Overall Recommendation:";

/// Evaluation prompt. Replace `{name}` and `{interview_text}`.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are a senior recruiter evaluating a completed interview.

Candidate: {name}

INTERVIEW TRANSCRIPT:
{interview_text}

Evaluate the candidate's responses. Cover:
1. Communication Skills
2. Technical Competence
3. Problem-Solving Ability
4. Cultural Fit
5. Key Strengths
6. Areas for Improvement

Rate each area from 1 to 10 with a short justification.
Finish with a single final line of the form:
Overall Recommendation: <Strong Hire | Hire | Maybe | No Hire>"#;

/// Report body. Placeholders: `{timestamp}`, `{name}`, `{date}`,
/// `{interview_text}`, `{evaluation}`, `{recommendation}`.
pub const REPORT_TEMPLATE: &str = r#"# Interview Report

_Generated: {timestamp}_

## Candidate Information
- **Name:** {name}
- **Interview Date:** {date}

## Interview Transcript
{interview_text}

## AI Evaluation
{evaluation}

## Final Recommendation
{recommendation}
"#;
