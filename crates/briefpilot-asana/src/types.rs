// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asana API request/response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use briefpilot_core::types::{EnumOption, FieldDefinition, FieldKind, Section};

/// Asana wraps every request and response body in a `data` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// One entry from `GET /projects/{gid}/custom_field_settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldSetting {
    /// The custom field definition. Absent for settings the token
    /// cannot read.
    #[serde(default)]
    pub custom_field: Option<ApiCustomField>,
}

/// A custom field definition as returned by the Asana API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCustomField {
    pub gid: String,
    pub name: String,
    /// Field kind discriminator ("text", "number", "date", "enum",
    /// "multi_enum", "people", ...).
    #[serde(default)]
    pub resource_subtype: Option<String>,
    #[serde(default)]
    pub enum_options: Option<Vec<ApiEnumOption>>,
}

/// An enum option within a custom field definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnumOption {
    pub gid: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl From<ApiCustomField> for FieldDefinition {
    fn from(field: ApiCustomField) -> Self {
        FieldDefinition {
            id: field.gid,
            display_name: field.name,
            kind: field_kind(field.resource_subtype.as_deref()),
            options: field
                .enum_options
                .unwrap_or_default()
                .into_iter()
                .map(|o| EnumOption {
                    id: o.gid,
                    display_name: o.name,
                    enabled: o.enabled,
                })
                .collect(),
        }
    }
}

/// Map an Asana `resource_subtype` to a [`FieldKind`].
///
/// Subtypes this pipeline cannot set ("people", "custom_id", anything
/// new) map to `Unsupported` so the resolver skips them.
fn field_kind(subtype: Option<&str>) -> FieldKind {
    match subtype {
        Some("text") => FieldKind::Text,
        Some("number") => FieldKind::Number,
        Some("date") => FieldKind::Date,
        Some("enum") => FieldKind::Enum,
        Some("multi_enum") => FieldKind::MultiEnum,
        _ => FieldKind::Unsupported,
    }
}

/// A section as returned by `GET /projects/{gid}/sections`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    pub gid: String,
    pub name: String,
}

impl From<ApiSection> for Section {
    fn from(section: ApiSection) -> Self {
        Section {
            id: section.gid,
            name: section.name,
        }
    }
}

/// Request body for `POST /tasks` (inside the `data` envelope).
#[derive(Debug, Clone, Serialize)]
pub struct TaskPayload {
    pub name: String,
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memberships: Option<Vec<Membership>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Value>,
}

/// A project/section membership for a new task.
#[derive(Debug, Clone, Serialize)]
pub struct Membership {
    pub project: String,
    pub section: String,
}

/// A created task as returned by `POST /tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTask {
    pub gid: String,
    #[serde(default)]
    pub permalink_url: Option<String>,
}

/// Request body for `POST /attachments` (inside the `data` envelope).
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentPayload {
    pub parent: String,
    pub resource_subtype: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A created attachment as returned by `POST /attachments`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAttachment {
    pub gid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_field_converts_with_kind_and_options() {
        let json = r#"{
            "gid": "300",
            "name": "Priority",
            "resource_subtype": "enum",
            "enum_options": [
                {"gid": "301", "name": "High", "enabled": true},
                {"gid": "302", "name": "Retired", "enabled": false}
            ]
        }"#;
        let api: ApiCustomField = serde_json::from_str(json).unwrap();
        let field: FieldDefinition = api.into();
        assert_eq!(field.id, "300");
        assert_eq!(field.kind, FieldKind::Enum);
        assert_eq!(field.options.len(), 2);
        assert!(field.options[0].enabled);
        assert!(!field.options[1].enabled);
    }

    #[test]
    fn unknown_subtype_maps_to_unsupported() {
        assert_eq!(field_kind(Some("people")), FieldKind::Unsupported);
        assert_eq!(field_kind(Some("custom_id")), FieldKind::Unsupported);
        assert_eq!(field_kind(None), FieldKind::Unsupported);
        assert_eq!(field_kind(Some("multi_enum")), FieldKind::MultiEnum);
    }

    #[test]
    fn enum_option_enabled_defaults_true() {
        let json = r#"{"gid": "1", "name": "Email"}"#;
        let option: ApiEnumOption = serde_json::from_str(json).unwrap();
        assert!(option.enabled);
    }

    #[test]
    fn task_payload_omits_empty_fields() {
        let payload = TaskPayload {
            name: "Task".into(),
            projects: vec!["p1".into()],
            notes: None,
            assignee: None,
            due_on: None,
            memberships: None,
            custom_fields: None,
        };
        let json = serde_json::to_value(Envelope { data: payload }).unwrap();
        assert_eq!(json["data"]["name"], "Task");
        assert_eq!(json["data"]["projects"][0], "p1");
        assert!(json["data"].get("notes").is_none());
        assert!(json["data"].get("memberships").is_none());
    }

    #[test]
    fn task_payload_serializes_membership_and_fields() {
        let payload = TaskPayload {
            name: "Task".into(),
            projects: vec!["p1".into()],
            notes: Some("notes".into()),
            assignee: Some("u1".into()),
            due_on: Some("2026-01-05".into()),
            memberships: Some(vec![Membership {
                project: "p1".into(),
                section: "s1".into(),
            }]),
            custom_fields: Some(serde_json::json!({"200": {"date": "2026-01-03"}})),
        };
        let json = serde_json::to_value(Envelope { data: payload }).unwrap();
        assert_eq!(json["data"]["memberships"][0]["section"], "s1");
        assert_eq!(json["data"]["custom_fields"]["200"]["date"], "2026-01-03");
        assert_eq!(json["data"]["due_on"], "2026-01-05");
    }
}
