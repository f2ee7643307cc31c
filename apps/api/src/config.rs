use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::interview::catalog::Catalog;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub reports_dir: PathBuf,
    pub questions_per_section: usize,
    pub max_questions: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            model: optional_env("LLM_MODEL", DEFAULT_MODEL),
            reports_dir: PathBuf::from(optional_env("REPORTS_DIR", "reports")),
            questions_per_section: optional_env("QUESTIONS_PER_SECTION", "3")
                .parse::<usize>()
                .context("QUESTIONS_PER_SECTION must be a non-negative integer")?,
            max_questions: optional_env("MAX_QUESTIONS", "10")
                .parse::<usize>()
                .context("MAX_QUESTIONS must be a non-negative integer")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }

    /// The built-in section catalog bounded by the configured limits.
    pub fn catalog(&self) -> Catalog {
        Catalog::standard(self.questions_per_section, self.max_questions)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
