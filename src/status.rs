//! Two-line status message shown at the bottom of the canvas.

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            severity: Severity::Info,
            title: String::new(),
            detail: String::new(),
        }
    }
}

impl StatusLine {
    /// Replace the message. Every pushed message is also logged.
    pub fn push(&mut self, severity: Severity, title: impl Into<String>, detail: impl Into<String>) {
        self.severity = severity;
        self.title = title.into();
        self.detail = detail.into();
        match severity {
            Severity::Info => info!(title = %self.title, "{}", self.detail),
            Severity::Warning => warn!(title = %self.title, "{}", self.detail),
            Severity::Error => error!(title = %self.title, "{}", self.detail),
        }
    }

    pub fn info(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Info, title, detail);
    }

    pub fn warning(&mut self, detail: impl std::fmt::Display) {
        self.push(Severity::Warning, "[warning]", detail.to_string());
    }

    pub fn error(&mut self, title: impl Into<String>, detail: impl std::fmt::Display) {
        self.push(Severity::Error, title, detail.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;

    #[test]
    fn warning_uses_error_text_as_detail() {
        let mut status = StatusLine::default();
        status.warning(PlanError::RoomExists { x: 1, y: 2 });
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.title, "[warning]");
        assert_eq!(status.detail, "Selected room already exists.");
    }
}
