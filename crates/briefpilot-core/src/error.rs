// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Briefpilot pipeline.

use thiserror::Error;

/// Classifies tracker-side failures on verification paths so callers can
/// distinguish a missing resource from a permission problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum TrackerErrorKind {
    /// The project, section, or item does not exist (HTTP 404).
    #[strum(serialize = "not found")]
    NotFound,
    /// The access token was rejected or lacks permission (HTTP 401/403).
    #[strum(serialize = "not authorized")]
    NotAuthorized,
    /// Anything else the tracker reported.
    #[strum(serialize = "unknown failure")]
    Unknown,
}

/// The primary error type used across all Briefpilot adapter traits and
/// pipeline operations.
#[derive(Debug, Error)]
pub enum BriefpilotError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// The brief could not be turned into a campaign at all: the document
    /// was empty or the AI backend was unreachable. Fatal to the batch.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// AI completion backend errors (API failure, token limits).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Document source errors (inaccessible or unreadable document).
    #[error("document error: {message}")]
    Document {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tracker API errors, typed so verification endpoints can surface
    /// "not found" vs "not authorized" with a remediation hint.
    #[error("tracker error ({kind}): {message}")]
    Tracker {
        kind: TrackerErrorKind,
        message: String,
        /// What the operator should check to fix this.
        hint: String,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BriefpilotError {
    /// Convenience constructor for provider errors without a source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Convenience constructor for tracker errors.
    pub fn tracker(
        kind: TrackerErrorKind,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Tracker {
            kind,
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// The remediation hint carried by tracker errors, if any.
    pub fn remediation(&self) -> Option<&str> {
        match self {
            Self::Tracker { hint, .. } => Some(hint),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_error_display_includes_kind_and_message() {
        let err = BriefpilotError::tracker(
            TrackerErrorKind::NotFound,
            "project 123 does not exist",
            "check the project id in your config",
        );
        let rendered = err.to_string();
        assert!(rendered.contains("not found"), "got: {rendered}");
        assert!(rendered.contains("project 123"), "got: {rendered}");
        assert_eq!(
            err.remediation(),
            Some("check the project id in your config")
        );
    }

    #[test]
    fn non_tracker_errors_carry_no_remediation() {
        assert!(BriefpilotError::Extraction("empty".into())
            .remediation()
            .is_none());
        assert!(BriefpilotError::provider("down").remediation().is_none());
    }

    #[test]
    fn kind_display_is_human_readable() {
        assert_eq!(TrackerErrorKind::NotAuthorized.to_string(), "not authorized");
        assert_eq!(TrackerErrorKind::Unknown.to_string(), "unknown failure");
    }
}
