// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload extraction from AI completions, with malformed-output recovery.
//!
//! Clean responses take the fast path: strip a fenced code block if present
//! and parse the remainder as JSON. When that fails, a brace-depth scanner
//! isolates syntactically complete task objects from the malformed text so
//! a single truncated suffix never loses the well-formed prefix.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

static TASKS_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""tasks"\s*:\s*\["#).expect("tasks marker regex"));

static CAMPAIGN_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""campaign_name"\s*:\s*"([^"]+)""#).expect("name regex"));
static CAMPAIGN_DESC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""campaign_description"\s*:\s*"([^"]+)""#).expect("desc regex"));
static CAMPAIGN_GOALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""campaign_goals"\s*:\s*"([^"]+)""#).expect("goals regex"));
static TARGET_AUDIENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""target_audience"\s*:\s*"([^"]+)""#).expect("audience regex"));

/// Extract the campaign payload from an AI response.
///
/// Always returns an object: a parsed one on the fast path, a recovered one
/// when the response is malformed but tasks can be salvaged, and an
/// empty-task campaign when nothing is recoverable.
pub fn extract_campaign_payload(response_text: &str) -> Value {
    let json_str = strip_code_fence(response_text);

    match serde_json::from_str::<Value>(json_str) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "AI response is not valid JSON, attempting recovery");

            let tasks = recover_tasks(response_text);
            if tasks.is_empty() {
                warn!("recovery yielded no tasks, returning empty campaign");
                return json!({
                    "campaign_name": "Untitled Campaign",
                    "tasks": [],
                });
            }

            info!(recovered = tasks.len(), "recovered tasks from malformed JSON");
            let info = recover_campaign_info(response_text);
            json!({
                "campaign_name": info.name.unwrap_or_else(|| "Recovered Campaign".to_string()),
                "campaign_description": info.description.unwrap_or_default(),
                "campaign_goals": info.goals.unwrap_or_default(),
                "target_audience": info.target_audience.unwrap_or_default(),
                "tasks": tasks,
                "metadata": { "extraction_method": "fallback" },
            })
        }
    }
}

/// Strip a fenced code block (```json or plain ```) wrapper, if present.
/// Otherwise the whole response is treated as the payload.
pub fn strip_code_fence(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let body = &text[start + 7..];
        match body.find("```") {
            Some(end) => body[..end].trim(),
            None => body.trim(),
        }
    } else if let Some(start) = text.find("```") {
        let body = &text[start + 3..];
        match body.find("```") {
            Some(end) => body[..end].trim(),
            None => body.trim(),
        }
    } else {
        text.trim()
    }
}

/// Isolate complete task objects from malformed JSON.
///
/// Finds the `"tasks": [` marker, then walks the remainder character by
/// character tracking brace depth. Each depth-balanced `{...}` fragment is
/// parsed independently; fragments that parse and carry a `name` key are
/// kept, everything else (including a trailing truncated object) is
/// discarded.
pub fn recover_tasks(text: &str) -> Vec<Value> {
    let Some(marker) = TASKS_MARKER_RE.find(text) else {
        return Vec::new();
    };

    let mut tasks = Vec::new();
    let body = &text[marker.end()..];
    let mut depth = 0usize;
    let mut fragment_start: Option<usize> = None;

    for (i, ch) in body.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    fragment_start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0
                    && let Some(start) = fragment_start.take()
                {
                    let fragment = &body[start..=i];
                    match serde_json::from_str::<Value>(fragment) {
                        Ok(obj) if has_name(&obj) => tasks.push(obj),
                        Ok(_) => debug!("skipping recovered object without a name"),
                        Err(_) => debug!("skipping unparseable recovered fragment"),
                    }
                }
            }
            // End of the tasks list.
            ']' if depth == 0 => break,
            _ => {}
        }
    }

    tasks
}

fn has_name(value: &Value) -> bool {
    matches!(value.get("name"), Some(Value::String(s)) if !s.is_empty())
}

/// Top-level campaign fields recovered independently of the broken
/// structure around them.
#[derive(Debug, Default)]
pub struct RecoveredCampaignInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub goals: Option<String>,
    pub target_audience: Option<String>,
}

/// Pull campaign metadata out of malformed JSON via tolerant regexes.
pub fn recover_campaign_info(text: &str) -> RecoveredCampaignInfo {
    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    RecoveredCampaignInfo {
        name: capture(&CAMPAIGN_NAME_RE),
        description: capture(&CAMPAIGN_DESC_RE),
        goals: capture(&CAMPAIGN_GOALS_RE),
        target_audience: capture(&TARGET_AUDIENCE_RE),
    }
}

/// `true` when the payload carries a metadata mark showing it came from the
/// recovery path rather than a clean parse.
pub fn was_recovered(payload: &Value) -> bool {
    payload
        .pointer("/metadata/extraction_method")
        .and_then(Value::as_str)
        == Some("fallback")
}
