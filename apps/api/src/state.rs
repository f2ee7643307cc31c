use std::sync::Arc;

use tokio::sync::Mutex;

use crate::interview::engine::Interviewer;
use crate::interview::session::InterviewSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub interviewer: Arc<Interviewer>,
    /// The single in-memory interview. Held for the whole request, completion
    /// calls included, so interactions are applied one at a time.
    pub session: Arc<Mutex<InterviewSession>>,
}

impl AppState {
    pub fn new(interviewer: Interviewer) -> Self {
        Self {
            interviewer: Arc::new(interviewer),
            session: Arc::new(Mutex::new(InterviewSession::new())),
        }
    }
}
