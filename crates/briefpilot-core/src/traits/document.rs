// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document source trait for fetching brief documents.

use async_trait::async_trait;

use crate::error::BriefpilotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::DocHeading;

/// Adapter for the service that serves brief documents.
///
/// Implementations render tables as markdown pipe-tables inside the plain
/// text, and expose headings with stable anchor ids for deep linking.
#[async_trait]
pub trait DocumentSource: PluginAdapter {
    /// Fetches the document as plain text. Fails when the document is
    /// inaccessible or empty.
    async fn fetch(&self, url: &str) -> Result<String, BriefpilotError>;

    /// Returns the document's headings in document order.
    async fn fetch_headings(&self, url: &str) -> Result<Vec<DocHeading>, BriefpilotError>;

    /// Builds a URL that links directly to the given heading anchor.
    fn build_anchor_url(&self, url: &str, anchor_id: &str) -> String;
}
