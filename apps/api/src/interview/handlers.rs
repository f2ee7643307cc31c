//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::catalog::Catalog;
use crate::interview::prompts::{
    COMPLETION_MESSAGE, INITIAL_GREETING, RETRY_PROMPT, WELCOME_TEMPLATE,
};
use crate::interview::session::{InterviewSession, Phase, SessionEvent};
use crate::llm_client::prompts::fill_template;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Assistant,
    User,
}

#[derive(Debug, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub asked: usize,
    pub max: usize,
    pub fraction: f64,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: Phase,
    pub candidate_name: Option<String>,
    /// What the assistant is waiting on right now, if anything.
    pub prompt: Option<String>,
    /// True when a failed question fetch or evaluation awaits `/continue`.
    pub pending: bool,
    pub history: Vec<ChatTurn>,
    pub progress: ProgressView,
    pub evaluation: Option<String>,
    pub report_path: Option<String>,
    pub report_error: Option<String>,
}

impl SessionView {
    pub fn build(session: &InterviewSession, catalog: &Catalog) -> Self {
        // A section without a current question or an unfinished evaluation
        // means a failed completion call is waiting for /continue.
        let question = session.current_question(catalog);
        let pending = matches!(
            (session.phase(), question),
            (Phase::InSection { .. }, None) | (Phase::Evaluating, _)
        );
        let prompt = if pending {
            RETRY_PROMPT
        } else {
            match session.phase() {
                Phase::AwaitingName => INITIAL_GREETING,
                Phase::InSection { .. } => question.unwrap_or_default(),
                Phase::Evaluating | Phase::Complete => COMPLETION_MESSAGE,
            }
        };

        Self {
            session_id: session.id(),
            phase: session.phase(),
            candidate_name: session.candidate_name().map(str::to_string),
            prompt: Some(prompt.to_string()),
            pending,
            history: history(session, catalog),
            progress: ProgressView {
                asked: session.total_asked(),
                max: catalog.max_questions,
                fraction: session.progress(catalog),
                label: format!(
                    "Question {} of {}",
                    session.total_asked(),
                    catalog.max_questions
                ),
            },
            evaluation: session.evaluation().map(str::to_string),
            report_path: session.report_path().map(|p| p.display().to_string()),
            report_error: session.report_error().map(str::to_string),
        }
    }
}

/// Welcome line followed by every answered question, in catalog order.
fn history(session: &InterviewSession, catalog: &Catalog) -> Vec<ChatTurn> {
    let Some(name) = session.candidate_name() else {
        return Vec::new();
    };

    let mut turns = vec![ChatTurn {
        role: Role::Assistant,
        text: fill_template(WELCOME_TEMPLATE, &[("name", name)]),
    }];
    for section in session.transcript(catalog) {
        for (question, answer) in section.exchanges {
            turns.push(ChatTurn {
                role: Role::Assistant,
                text: question,
            });
            turns.push(ChatTurn {
                role: Role::User,
                text: answer,
            });
        }
    }
    turns
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/interview
pub async fn handle_get_interview(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::build(&session, state.interviewer.catalog()))
}

/// POST /api/v1/interview/name
///
/// A blank name is ignored and the greeting is returned again.
pub async fn handle_submit_name(
    State(state): State<AppState>,
    Json(req): Json<NameRequest>,
) -> Result<Json<SessionView>, AppError> {
    apply_event(&state, SessionEvent::NameSubmitted(req.name)).await
}

/// POST /api/v1/interview/answer
///
/// A blank answer is ignored and the current question is returned again.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    apply_event(&state, SessionEvent::AnswerSubmitted(req.answer)).await
}

/// POST /api/v1/interview/continue
///
/// Re-attempts whatever step failed last (question fetch or evaluation).
pub async fn handle_continue(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    state.interviewer.settle(&mut session).await?;
    Ok(Json(SessionView::build(&session, state.interviewer.catalog())))
}

/// POST /api/v1/interview/reset
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    apply_event(&state, SessionEvent::ResetRequested).await
}

async fn apply_event(state: &AppState, event: SessionEvent) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    state.interviewer.handle(&mut session, event).await?;
    Ok(Json(SessionView::build(&session, state.interviewer.catalog())))
}
