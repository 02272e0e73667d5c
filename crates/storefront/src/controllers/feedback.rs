//! Messages rendered into the page's result panel.

use askama::Template;

/// Whether a message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Success,
    Error,
}

impl FeedbackLevel {
    /// CSS classes applied to the result panel.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-error",
        }
    }
}

/// A message for the result panel, one entry per displayed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub lines: Vec<String>,
}

impl Feedback {
    /// A success message spanning `lines`.
    #[must_use]
    pub fn success<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            level: FeedbackLevel::Success,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// A single-line error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Error,
            lines: vec![message.into()],
        }
    }

    /// Returns `true` for success messages.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.level, FeedbackLevel::Success)
    }

    /// The message as plain text, lines joined by newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Render the result panel markup. Message text is HTML-escaped.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if rendering fails.
    pub fn render(&self) -> askama::Result<String> {
        ResultPanelTemplate {
            class: self.level.css_class(),
            lines: &self.lines,
        }
        .render()
    }
}

/// Result panel template.
#[derive(Template)]
#[template(path = "partials/result.html")]
struct ResultPanelTemplate<'a> {
    class: &'a str,
    lines: &'a [String],
}
