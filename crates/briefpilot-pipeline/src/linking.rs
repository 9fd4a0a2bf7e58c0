// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deep-link resolution from task names to document headings.
//!
//! Two passes over the heading list: first match the task's leading
//! channel+number token (`Email 1`, `SMS 2`) by containment of both tokens
//! in a heading's text, then fall back to shared leading words. No match
//! means the task links to the plain document URL.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use briefpilot_core::traits::DocumentSource;
use briefpilot_core::types::DocHeading;

static CHANNEL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(Email|SMS|MMS)\s+(\d+)").expect("channel token regex"));

/// How many leading task-name words the fallback pass considers, and how
/// many of them must appear in a heading for a match.
const FALLBACK_WORDS: usize = 3;
const FALLBACK_MIN_SHARED: usize = 2;

/// The anchor id of the heading that best matches `task_name`, if any.
pub fn find_heading_anchor<'a>(task_name: &str, headings: &'a [DocHeading]) -> Option<&'a str> {
    if headings.is_empty() {
        return None;
    }

    if let Some(caps) = CHANNEL_TOKEN.captures(task_name) {
        let channel = caps[1].to_lowercase();
        let number = caps[2].to_string();
        for heading in headings {
            let text = heading.text.to_lowercase();
            if text.contains(&channel) && text.contains(&number) {
                debug!(task = task_name, heading = %heading.text, "matched heading by channel token");
                return Some(&heading.anchor_id);
            }
        }
    }

    let task_words: Vec<String> = task_name
        .split_whitespace()
        .take(FALLBACK_WORDS)
        .map(str::to_lowercase)
        .collect();
    for heading in headings {
        let heading_words: Vec<String> = heading
            .text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let shared = task_words
            .iter()
            .filter(|w| heading_words.contains(w))
            .count();
        if shared >= FALLBACK_MIN_SHARED {
            debug!(task = task_name, heading = %heading.text, "matched heading by shared words");
            return Some(&heading.anchor_id);
        }
    }

    debug!(task = task_name, "no matching heading");
    None
}

/// A URL for the task: heading-anchored when a heading matches, otherwise
/// the plain document URL.
pub fn resolve_deep_link(
    docs: &dyn DocumentSource,
    doc_url: &str,
    task_name: &str,
    headings: &[DocHeading],
) -> String {
    match find_heading_anchor(task_name, headings) {
        Some(anchor_id) => docs.build_anchor_url(doc_url, anchor_id),
        None => doc_url.to_string(),
    }
}
