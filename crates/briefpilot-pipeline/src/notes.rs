// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task notes assembly: labeled sections in a fixed order, blank ones
//! skipped, joined with blank lines.

use std::sync::LazyLock;

use regex::Regex;

use briefpilot_core::types::ParsedTask;

/// An embedded `**Copy:**` block inside free-form notes duplicates the
/// dedicated Email Body section, so it is stripped to end of text.
static EMBEDDED_COPY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*Copy:\*\*\n.*").expect("embedded copy regex"));

/// Render the notes body for one task. The brief link always leads; the
/// remaining sections appear only when their source field is non-empty.
pub fn build_task_notes(task: &ParsedTask, doc_link: &str) -> String {
    let mut sections = vec![format!("**Campaign Brief:** {doc_link}")];

    if !task.subject.is_empty() {
        sections.push(format!("**Subject Line:**\n{}", task.subject));
    }
    if !task.copy.is_empty() {
        sections.push(format!("**Email Body:**\n{}", task.copy));
    }
    if !task.copywriter_instructions.is_empty() {
        sections.push(format!(
            "✍️ **Copywriter Instructions:**\n{}",
            task.copywriter_instructions
        ));
    }
    if !task.designer_instructions.is_empty() {
        sections.push(format!(
            "🎨 **Designer Instructions:**\n{}",
            task.designer_instructions
        ));
    }
    if !task.targeted_audiences.is_empty() {
        sections.push(format!(
            "🎯 **Targeted Audiences:**\n{}",
            task.targeted_audiences
        ));
    }
    if !task.excluded_audiences.is_empty() {
        sections.push(format!(
            "🚫 **Excluded Audiences:**\n{}",
            task.excluded_audiences
        ));
    }
    if !task.description.is_empty() {
        sections.push(format!("**Task Details:**\n{}", task.description));
    }
    if !task.notes.is_empty() {
        let cleaned = EMBEDDED_COPY.replace(&task.notes, "");
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            sections.push(format!("**Additional Notes:**\n{cleaned}"));
        }
    }

    sections.join("\n\n")
}
