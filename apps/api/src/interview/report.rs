//! Report Writer: renders the Markdown report and saves it under the reports directory.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::info;

use crate::interview::prompts::{RECOMMENDATION_MARKER, REPORT_TEMPLATE};
use crate::interview::session::TranscriptSection;
use crate::llm_client::prompts::fill_template;

#[derive(Debug, Error)]
#[error("Failed to write report to {}: {source}", .path.display())]
pub struct ReportError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn write_report(
        &self,
        candidate_name: &str,
        transcript: &[TranscriptSection],
        evaluation: &str,
    ) -> Result<PathBuf, ReportError> {
        self.write_report_at(
            candidate_name,
            transcript,
            evaluation,
            Local::now().naive_local(),
        )
        .await
    }

    /// Renders and writes the report as of `now`. A later report for the same
    /// candidate on the same day overwrites the earlier one.
    pub async fn write_report_at(
        &self,
        candidate_name: &str,
        transcript: &[TranscriptSection],
        evaluation: &str,
        now: NaiveDateTime,
    ) -> Result<PathBuf, ReportError> {
        let content = render_report(candidate_name, transcript, evaluation, now);
        let path = self.dir.join(report_file_name(candidate_name, now));

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ReportError {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| ReportError {
                path: path.clone(),
                source,
            })?;

        info!("Interview report saved to {}", path.display());
        Ok(path)
    }
}

pub fn render_report(
    candidate_name: &str,
    transcript: &[TranscriptSection],
    evaluation: &str,
    now: NaiveDateTime,
) -> String {
    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let date = now.format("%Y-%m-%d").to_string();
    let interview_text = format_markdown_transcript(transcript);
    let recommendation = extract_recommendation(evaluation);

    fill_template(
        REPORT_TEMPLATE,
        &[
            ("timestamp", timestamp.as_str()),
            ("name", candidate_name),
            ("date", date.as_str()),
            ("interview_text", interview_text.as_str()),
            ("evaluation", evaluation),
            ("recommendation", recommendation),
        ],
    )
}

fn format_markdown_transcript(sections: &[TranscriptSection]) -> String {
    let mut text = String::new();
    for section in sections {
        text.push_str(&format!("\n### {}\n", section.label));
        for (question, answer) in &section.exchanges {
            text.push_str(&format!("\n**Q:** {question}\n**A:** {answer}\n"));
        }
    }
    text
}

/// Everything after the last recommendation marker, trimmed; empty when absent.
pub fn extract_recommendation(evaluation: &str) -> &str {
    evaluation
        .rsplit_once(RECOMMENDATION_MARKER)
        .map(|(_, rest)| rest.trim())
        .unwrap_or("")
}

/// `<name>_<YYYYMMDD>.md`, with the name lower-cased and anything other than
/// letters, digits, `-` and `_` turned into `_`.
pub fn report_file_name(candidate_name: &str, now: NaiveDateTime) -> String {
    let normalized: String = candidate_name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.md", normalized, now.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    fn transcript() -> Vec<TranscriptSection> {
        vec![TranscriptSection {
            label: "Technical Skills".to_string(),
            exchanges: vec![
                ("Which language do you use most?".to_string(), "Rust".to_string()),
                ("Describe a hard bug.".to_string(), "A {evaluation} race".to_string()),
            ],
        }]
    }

    #[test]
    fn test_extract_recommendation() {
        assert_eq!(
            extract_recommendation("Great.\nOverall Recommendation: Strong Hire"),
            "Strong Hire"
        );
        assert_eq!(extract_recommendation("No marker here"), "");
        assert_eq!(
            extract_recommendation("Overall Recommendation: Maybe\nOverall Recommendation:  Hire \n"),
            "Hire"
        );
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("Ann Lee", at()), "ann_lee_20240305.md");
        assert_eq!(report_file_name("../etc/passwd", at()), "___etc_passwd_20240305.md");
    }

    #[test]
    fn test_render_fills_every_placeholder() {
        let rendered = render_report(
            "Ann Lee",
            &transcript(),
            "Strong.\nOverall Recommendation: Strong Hire",
            at(),
        );

        assert!(rendered.contains("_Generated: 2024-03-05 14:07:09_"));
        assert!(rendered.contains("- **Interview Date:** 2024-03-05"));
        assert!(rendered.contains("### Technical Skills"));
        assert!(rendered.contains("**Q:** Which language do you use most?\n**A:** Rust"));
        assert!(rendered.contains("## Final Recommendation\nStrong Hire"));
        // Placeholder-looking text inside an answer is not expanded.
        assert!(rendered.contains("**A:** A {evaluation} race"));
    }

    #[tokio::test]
    async fn test_write_report_round_trip() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));
        let evaluation = "Clear communicator.\nOverall Recommendation: Hire";

        let path = writer
            .write_report_at("Ann Lee", &transcript(), evaluation, at())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("reports").join("ann_lee_20240305.md"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Ann Lee"));
        for (question, answer) in &transcript()[0].exchanges {
            assert!(content.contains(question.as_str()));
            assert!(content.contains(answer.as_str()));
        }
        assert!(content.contains(evaluation));
    }

    #[tokio::test]
    async fn test_same_day_report_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path());

        writer
            .write_report_at("Ann", &[], "first", at())
            .await
            .unwrap();
        let path = writer
            .write_report_at("Ann", &[], "second", at())
            .await
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("second"));
        assert!(!content.contains("first"));
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file").unwrap();
        let writer = ReportWriter::new(&blocker);

        let result = writer.write_report_at("Ann", &[], "eval", at()).await;

        assert!(result.is_err());
    }
}
