// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation and cleanup of the extracted campaign payload.
//!
//! Coerces missing top-level fields to defaults, drops tasks without a
//! name, enforces the strict `YYYY-MM-DD` date shape, and folds provided
//! copy into the notes so it is never discarded.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use briefpilot_core::types::{ParsedCampaign, ParsedTask};

static SEND_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("send date regex"));

/// Validate and clean an extracted campaign payload into the typed model.
pub fn validate_campaign(payload: &Value) -> ParsedCampaign {
    let mut campaign = ParsedCampaign {
        name: string_field(payload, "campaign_name"),
        description: string_field(payload, "campaign_description"),
        goals: string_field(payload, "campaign_goals"),
        target_audience: string_field(payload, "target_audience"),
        tasks: Vec::new(),
        metadata: metadata_map(payload.get("metadata")),
    };
    if campaign.name.is_empty() {
        campaign.name = "Untitled Campaign".to_string();
    }

    if let Some(raw_tasks) = payload.get("tasks").and_then(Value::as_array) {
        for (idx, raw) in raw_tasks.iter().enumerate() {
            if let Some(task) = validate_task(raw, idx + 1) {
                campaign.tasks.push(task);
            }
        }
    }

    campaign
}

/// Validate a single raw task object. Returns `None` when the task has no
/// name; such tasks never reach the orchestrator.
pub fn validate_task(raw: &Value, task_number: usize) -> Option<ParsedTask> {
    let name = string_field(raw, "name");
    if name.is_empty() {
        warn!(task_number, "task has no name, skipping");
        return None;
    }

    let mut task = ParsedTask {
        name,
        description: string_field(raw, "description"),
        message_type: string_field(raw, "message_type"),
        task_type: string_field(raw, "task_type"),
        client: string_field(raw, "client"),
        send_date: validate_send_date(raw.get("send_date")),
        send_time: string_field(raw, "send_time"),
        subject: string_field(raw, "subject"),
        copy: string_field(raw, "copy"),
        copywriter_instructions: string_field(raw, "copywriter_instructions"),
        designer_instructions: string_field(raw, "designer_instructions"),
        notes: string_field(raw, "notes"),
        coupon_code: string_field(raw, "coupon_code"),
        coupon_name: string_field(raw, "coupon_name"),
        targeted_audiences: string_field(raw, "targeted_audiences"),
        excluded_audiences: string_field(raw, "excluded_audiences"),
        custom_fields: custom_fields_map(raw.get("custom_fields")),
    };

    // Fold copy into notes so it survives even if the notes section is the
    // only thing a downstream consumer reads.
    if !task.copy.is_empty() {
        if task.notes.is_empty() {
            task.notes = format!("**Copy:**\n{}", task.copy);
        } else {
            task.notes = format!("{}\n\n**Copy:**\n{}", task.notes, task.copy);
        }
    }

    Some(task)
}

/// Enforce the strict `YYYY-MM-DD` shape. Non-matching dates become absent
/// with a logged warning, never fatal.
fn validate_send_date(value: Option<&Value>) -> Option<String> {
    let date = value?.as_str()?.trim();
    if date.is_empty() {
        return None;
    }
    if SEND_DATE_RE.is_match(date) {
        Some(date.to_string())
    } else {
        warn!(date, "invalid send date, expected YYYY-MM-DD");
        None
    }
}

/// Fetch a field as a string, coercing scalars and defaulting to empty.
fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn custom_fields_map(value: Option<&Value>) -> BTreeMap<String, Value> {
    value
        .and_then(Value::as_object)
        .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

/// Coerce the metadata object into string values, dropping nested noise.
fn metadata_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| {
                    let rendered = match v {
                        Value::String(s) => s.clone(),
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        _ => return None,
                    };
                    Some((k.clone(), rendered))
                })
                .collect()
        })
        .unwrap_or_default()
}
