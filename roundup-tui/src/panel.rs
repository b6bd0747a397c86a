use crate::styles;
use ratatui::style::Style;
use roundup_core::{DigestError, DigestOutcome};

pub const NO_POSTS: &str = "No posts found in the selected window";

/// What the result panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    Hint,
    Running { list_id: String },
    Digest(String),
    NoPosts,
    InvalidInput(String),
    SourceFailed(String),
    SummarizationFailed(String),
}

#[derive(Clone)]
pub struct PanelLine {
    pub text: String,
    pub style: Style,
}

impl PanelLine {
    fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl ResultPanel {
    pub fn from_result(result: &Result<DigestOutcome, DigestError>) -> Self {
        match result {
            Ok(DigestOutcome::Digest(text)) => Self::Digest(text.clone()),
            Ok(DigestOutcome::NothingToSummarize) => Self::NoPosts,
            Err(err) if err.is_input_error() => Self::InvalidInput(err.to_string()),
            Err(DigestError::Source(cause)) => Self::SourceFailed(cause.to_string()),
            Err(DigestError::Summarization(cause)) => Self::SummarizationFailed(cause.to_string()),
            Err(other) => Self::InvalidInput(other.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::SourceFailed(_) | Self::SummarizationFailed(_)
        )
    }

    pub fn lines(&self) -> Vec<PanelLine> {
        match self {
            Self::Hint => vec![
                PanelLine::new(
                    "Enter a list id or list URL and a date range, then press Enter.",
                    styles::system(),
                ),
                PanelLine::new(
                    "The end date is exclusive (midnight UTC) and only the most recent page of the list is fetched; set the end date to tomorrow to include today.",
                    styles::dim(),
                ),
                PanelLine::new(
                    "Tab / Shift-Tab move between fields. Ctrl-C quits.",
                    styles::dim(),
                ),
            ],
            Self::Running { list_id } => vec![PanelLine::new(
                format!("Generating digest for list {list_id}…"),
                styles::system(),
            )],
            Self::Digest(text) => {
                let mut out = vec![PanelLine::new("Digest", styles::digest_header())];
                out.extend(
                    text.lines()
                        .map(|line| PanelLine::new(line, styles::digest_text())),
                );
                out
            }
            Self::NoPosts => vec![PanelLine::new(NO_POSTS, styles::dim())],
            Self::InvalidInput(detail) => {
                vec![PanelLine::new(format!("× Invalid input: {detail}"), styles::error())]
            }
            Self::SourceFailed(detail) => vec![PanelLine::new(
                format!("× Data source failed: {detail}"),
                styles::error(),
            )],
            Self::SummarizationFailed(detail) => vec![PanelLine::new(
                format!("× Summarization failed: {detail}"),
                styles::error(),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roundup_core::SummarizerTimeout;
    use std::time::Duration;

    fn texts(panel: &ResultPanel) -> Vec<String> {
        panel.lines().into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn digest_is_rendered_line_by_line() {
        let panel = ResultPanel::from_result(&Ok(DigestOutcome::Digest("one\ntwo".into())));
        assert_eq!(texts(&panel), vec!["Digest", "one", "two"]);
        assert!(!panel.is_error());
    }

    #[test]
    fn hint_explains_exclusive_end_date() {
        let hint = texts(&ResultPanel::Hint).join("\n");
        assert!(hint.contains("exclusive"));
        assert!(hint.contains("tomorrow"));
    }

    #[test]
    fn empty_window_is_not_an_error() {
        let panel = ResultPanel::from_result(&Ok(DigestOutcome::NothingToSummarize));
        assert_eq!(panel, ResultPanel::NoPosts);
        assert_eq!(texts(&panel), vec![NO_POSTS]);
        assert!(!panel.is_error());
    }

    #[test]
    fn failures_are_distinguished() {
        let now = Utc::now();
        let invalid = ResultPanel::from_result(&Err(DigestError::InvalidRange {
            start: now,
            end: now - chrono::Duration::days(1),
        }));
        assert!(matches!(invalid, ResultPanel::InvalidInput(_)));
        assert!(texts(&invalid)[0].starts_with("× Invalid input: "));

        let source =
            ResultPanel::from_result(&Err(DigestError::Source("list not found".into())));
        assert_eq!(texts(&source), vec!["× Data source failed: list not found"]);

        let timeout = ResultPanel::from_result(&Err(DigestError::Summarization(Box::new(
            SummarizerTimeout(Duration::from_secs(2)),
        ))));
        assert!(timeout.is_error());
        assert!(texts(&timeout)[0].starts_with("× Summarization failed: "));
        assert!(texts(&timeout)[0].contains("timed out"));
    }
}
