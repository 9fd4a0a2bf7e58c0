// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock document source serving a fixed document and heading list.

use async_trait::async_trait;

use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::{DocumentSource, PluginAdapter};
use briefpilot_core::types::{AdapterType, DocHeading};

/// A document source that serves one fixed document.
pub struct StaticDocs {
    text: String,
    headings: Vec<DocHeading>,
    fail_headings: bool,
}

impl StaticDocs {
    /// Create a source serving the given text with no headings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            headings: Vec::new(),
            fail_headings: false,
        }
    }

    /// Attach a heading list. Anchor ids default to `h.<n>` when empty.
    pub fn with_headings(mut self, headings: Vec<DocHeading>) -> Self {
        self.headings = headings;
        self
    }

    /// Fail every `fetch_headings` call, as an inaccessible outline would.
    pub fn failing_headings(mut self) -> Self {
        self.fail_headings = true;
        self
    }

    /// Convenience constructor for a heading.
    pub fn heading(text: &str, anchor_id: &str) -> DocHeading {
        DocHeading {
            text: text.to_string(),
            anchor_id: anchor_id.to_string(),
            level: 2,
        }
    }
}

impl PluginAdapter for StaticDocs {
    fn name(&self) -> &str {
        "static-docs"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Document
    }
}

#[async_trait]
impl DocumentSource for StaticDocs {
    async fn fetch(&self, _url: &str) -> Result<String, BriefpilotError> {
        Ok(self.text.clone())
    }

    async fn fetch_headings(&self, _url: &str) -> Result<Vec<DocHeading>, BriefpilotError> {
        if self.fail_headings {
            return Err(BriefpilotError::Document {
                message: "scripted heading failure".to_string(),
                source: None,
            });
        }
        Ok(self.headings.clone())
    }

    fn build_anchor_url(&self, url: &str, anchor_id: &str) -> String {
        format!("{url}#heading={anchor_id}")
    }
}
