//! Deterministic completion fake for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::llm_client::{CompletionService, LlmError};

type Responder = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;

pub struct ScriptedCompletion {
    respond: Box<Responder>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(respond: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(unavailable()))
    }

    /// Answers question prompts by section label and evaluation prompts with `evaluation`.
    pub fn interview(sections: &[(&str, &str)], evaluation: &str) -> Self {
        let sections: Vec<(String, String)> = sections
            .iter()
            .map(|(label, raw)| (format!("section: {label}"), raw.to_string()))
            .collect();
        let evaluation = evaluation.to_string();

        Self::new(move |prompt| {
            if prompt.contains("INTERVIEW TRANSCRIPT") {
                return Ok(evaluation.clone());
            }
            Ok(sections
                .iter()
                .find(|(needle, _)| prompt.contains(needle.as_str()))
                .map(|(_, raw)| raw.clone())
                .unwrap_or_default())
        })
    }

    /// Fails every call with 503 while `down` is set, otherwise answers as before.
    pub fn with_outage(self, down: Arc<AtomicBool>) -> Self {
        let respond = self.respond;
        Self::new(move |prompt| {
            if down.load(Ordering::SeqCst) {
                Err(unavailable())
            } else {
                respond(prompt)
            }
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn evaluation_calls(&self) -> usize {
        self.prompts()
            .iter()
            .filter(|p| p.contains("INTERVIEW TRANSCRIPT"))
            .count()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.respond)(prompt)
    }
}

pub fn unavailable() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "service unavailable".to_string(),
    }
}
