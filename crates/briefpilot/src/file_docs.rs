// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local-file document source.
//!
//! Serves briefs from markdown files on disk so the pipeline runs end to
//! end without an external document service. Headings come from `#` lines;
//! anchor ids are URL slugs of the heading text, linked as `path#slug`.

use async_trait::async_trait;

use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::{DocumentSource, PluginAdapter};
use briefpilot_core::types::{AdapterType, DocHeading};

pub struct FileDocs;

impl FileDocs {
    pub fn new() -> Self {
        Self
    }

    async fn read(&self, url: &str) -> Result<String, BriefpilotError> {
        let path = url.strip_prefix("file://").unwrap_or(url).to_string();
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| BriefpilotError::Document {
                message: format!("could not read brief file {path}"),
                source: Some(Box::new(e)),
            })
    }
}

impl Default for FileDocs {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginAdapter for FileDocs {
    fn name(&self) -> &str {
        "file-docs"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Document
    }
}

#[async_trait]
impl DocumentSource for FileDocs {
    async fn fetch(&self, url: &str) -> Result<String, BriefpilotError> {
        let text = self.read(url).await?;
        if text.trim().is_empty() {
            return Err(BriefpilotError::Document {
                message: format!("brief file {url} is empty"),
                source: None,
            });
        }
        Ok(text)
    }

    async fn fetch_headings(&self, url: &str) -> Result<Vec<DocHeading>, BriefpilotError> {
        let text = self.read(url).await?;
        Ok(extract_headings(&text))
    }

    fn build_anchor_url(&self, url: &str, anchor_id: &str) -> String {
        format!("{url}#{anchor_id}")
    }
}

fn extract_headings(text: &str) -> Vec<DocHeading> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim_start();
            let level = trimmed.bytes().take_while(|b| *b == b'#').count();
            if level == 0 || level > 6 {
                return None;
            }
            let heading = trimmed[level..].trim();
            if heading.is_empty() {
                return None;
            }
            Some(DocHeading {
                text: heading.to_string(),
                anchor_id: slug(heading),
                level: level as u8,
            })
        })
        .collect()
}

/// Lowercase the text and collapse runs of non-alphanumerics into single
/// hyphens, github-anchor style.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_hyphen = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_brief(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(slug("Email 1: Welcome!"), "email-1-welcome");
        assert_eq!(slug("  SMS  2 — Reminder  "), "sms-2-reminder");
        assert_eq!(slug("Plain"), "plain");
    }

    #[test]
    fn headings_carry_level_and_anchor() {
        let headings = extract_headings("# Campaign\ntext\n## Email 1: Welcome\n####### nope\n##   \n");
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].anchor_id, "campaign");
        assert_eq!(headings[1].level, 2);
        assert_eq!(headings[1].text, "Email 1: Welcome");
        assert_eq!(headings[1].anchor_id, "email-1-welcome");
    }

    #[tokio::test]
    async fn fetch_rejects_empty_files() {
        let file = temp_brief("   \n\n");
        let docs = FileDocs::new();
        let err = docs
            .fetch(file.path().to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BriefpilotError::Document { .. }));
    }

    #[tokio::test]
    async fn fetch_and_headings_read_the_same_file() {
        let file = temp_brief("# Brief\n\n## Email 1: Welcome\n\nBody copy.\n");
        let docs = FileDocs::new();
        let path = file.path().to_str().unwrap();

        let text = docs.fetch(path).await.unwrap();
        assert!(text.contains("Body copy."));

        let headings = docs.fetch_headings(path).await.unwrap();
        assert_eq!(headings.len(), 2);
        assert_eq!(
            docs.build_anchor_url(path, &headings[1].anchor_id),
            format!("{path}#email-1-welcome")
        );
    }

    #[tokio::test]
    async fn missing_file_is_a_document_error() {
        let docs = FileDocs::new();
        let err = docs.fetch("/nonexistent/brief.md").await.unwrap_err();
        assert!(matches!(err, BriefpilotError::Document { .. }));
    }
}
