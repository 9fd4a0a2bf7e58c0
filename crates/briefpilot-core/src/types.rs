// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Briefpilot pipeline and adapter traits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Identifies the type of adapter wired into the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Provider,
    Document,
    Tracker,
}

// --- Provider types ---

/// A single-shot completion request to an AI backend.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Token accounting reported by a provider, when available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The full (non-streaming) response from an AI backend.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

// --- Document types ---

/// One heading extracted from a brief document, with a stable anchor id
/// that can be turned into a deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocHeading {
    pub text: String,
    pub anchor_id: String,
    pub level: u8,
}

// --- Campaign / task model ---

/// A campaign extracted from a brief document. Immutable after validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedCampaign {
    pub name: String,
    pub description: String,
    pub goals: String,
    pub target_audience: String,
    pub tasks: Vec<ParsedTask>,
    pub metadata: BTreeMap<String, String>,
}

/// One deliverable extracted from a brief, destined to become one item in
/// the external tracker.
///
/// All fields default to empty so partially-recovered JSON fragments still
/// deserialize; a task without a `name` is dropped during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedTask {
    pub name: String,
    pub description: String,
    /// Delivery channel: Email, SMS, MMS, Social, Banner, etc.
    pub message_type: String,
    /// "RESEND", "UPCYCLE", or empty for a standard task.
    pub task_type: String,
    pub client: String,
    /// Strict `YYYY-MM-DD`, or `None` when absent or malformed.
    pub send_date: Option<String>,
    pub send_time: String,
    pub subject: String,
    pub copy: String,
    pub copywriter_instructions: String,
    pub designer_instructions: String,
    pub notes: String,
    pub coupon_code: String,
    pub coupon_name: String,
    pub targeted_audiences: String,
    pub excluded_audiences: String,
    /// Any extra loose fields the brief mentioned, keyed by display name.
    pub custom_fields: BTreeMap<String, Value>,
}

impl ParsedTask {
    /// Whether this task is routed to the rework section.
    pub fn is_rework(&self) -> bool {
        matches!(self.task_type.as_str(), "RESEND" | "UPCYCLE")
    }
}

// --- Field definitions ---

/// The value kind of a tracker field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Enum,
    MultiEnum,
    /// Identifier-like kinds that cannot be set through the API.
    Unsupported,
}

impl FieldKind {
    pub fn is_enum(self) -> bool {
        matches!(self, Self::Enum | Self::MultiEnum)
    }
}

/// One selectable option of an enum or multi-enum field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub id: String,
    pub display_name: String,
    pub enabled: bool,
}

/// A typed, named attribute slot defined per project in the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub display_name: String,
    pub kind: FieldKind,
    /// Only populated for enum kinds.
    #[serde(default)]
    pub options: Vec<EnumOption>,
}

impl FieldDefinition {
    /// Ids of options that are currently selectable.
    pub fn enabled_option_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.enabled)
            .map(|o| o.id.as_str())
    }
}

/// Resolved field values keyed by field id, ready for submission.
///
/// Value shape depends on the field kind: plain string for text/number,
/// `{"date": "YYYY-MM-DD"}` for date, option id for enum, array of option
/// ids for multi-enum.
pub type MappedFieldSet = BTreeMap<String, Value>;

// --- Tracker types ---

/// A routing section within a tracker project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
}

/// A task-creation request submitted to the tracker.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub name: String,
    pub project_id: String,
    pub section_id: Option<String>,
    pub notes: Option<String>,
    pub fields: Option<MappedFieldSet>,
    pub assignee_id: Option<String>,
    /// Due date in `YYYY-MM-DD` form.
    pub due_on: Option<String>,
}

/// The tracker's handle for a created item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedItem {
    pub id: String,
    pub url: Option<String>,
}

/// A resource attached to a created item, when the tracker reports one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
}

// --- Batch results ---

/// Outcome of one task-creation attempt. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreationResult {
    pub task_number: usize,
    pub task_name: String,
    pub success: bool,
    pub remote_id: Option<String>,
    pub remote_url: Option<String>,
    pub error: Option<String>,
}

/// Lightweight per-task summary returned in preview mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPreview {
    pub number: usize,
    pub name: String,
    pub message_type: String,
    pub send_date: Option<String>,
    pub has_subject: bool,
    pub has_copy: bool,
}

/// Aggregate result of processing one brief. A batch always returns this,
/// never an all-or-nothing transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BriefProcessingResult {
    pub campaign_name: String,
    pub total_tasks: usize,
    pub tasks_created: usize,
    pub tasks_failed: usize,
    pub results: Vec<TaskCreationResult>,
    pub errors: Vec<String>,
    /// Present only when the run was a preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<TaskPreview>>,
}
