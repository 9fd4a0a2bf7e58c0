// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI-assisted resolution of loose field names into tracker field ids.
//!
//! The primary path asks the AI backend to fuzzy-match names and resolve
//! enum values to option ids. When that call fails, a deterministic
//! case-insensitive exact-match fallback takes over; on total failure the
//! resolver returns an empty mapping so task creation proceeds with no
//! custom fields rather than aborting.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::CompletionProvider;
use briefpilot_core::types::{
    CompletionRequest, FieldDefinition, FieldKind, MappedFieldSet,
};
use briefpilot_parser::recovery::strip_code_fence;

use crate::catalog::FieldCatalog;

/// Field ids that cannot be set through the API despite reporting a
/// settable kind. Known read-only fields that masquerade as text.
pub const EXCLUDED_FIELD_IDS: &[&str] = &["1206622940734675"];

const MAPPING_MAX_TOKENS: u32 = 4_000;

/// Deterministic sampling for field mapping.
const MAPPING_TEMPERATURE: f32 = 0.0;

const MAPPING_PROMPT: &str = r#"You are a field mapping assistant for task creation. Your job is to map field names and values from a brief document to the correct tracker field ids and option ids.

<tracker_fields>
{fields}
</tracker_fields>

<brief_fields>
{brief_fields}
</brief_fields>

{context}

Instructions:
1. For each field in brief_fields, find the best matching tracker field by name (fuzzy matching is OK)
2. For enum/multi_enum fields, also match the VALUE to the correct option id
3. For text/number/date fields, keep the value as-is
4. For multi_enum fields, the value should be an array of option ids
5. Only include fields that you can confidently match (skip if uncertain)
6. For dates, ensure format is YYYY-MM-DD

Return ONLY a JSON object mapping tracker field ids to their values:

For enum fields:
{"<field_id>": "<option_id>"}

For multi_enum fields:
{"<field_id>": ["<option_id_1>", "<option_id_2>"]}

For text/number/date fields:
{"<field_id>": "value"}

Respond with ONLY the JSON object, no explanations.
"#;

/// Resolves loosely-named brief attributes into tracker field ids.
pub struct FieldResolver {
    provider: Arc<dyn CompletionProvider>,
    catalog: FieldCatalog,
    model: String,
}

impl FieldResolver {
    /// Create a resolver over the given backend and catalogue.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        catalog: FieldCatalog,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            catalog,
            model: model.into(),
        }
    }

    /// The catalogue backing this resolver.
    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Resolve loose fields into a validated [`MappedFieldSet`].
    ///
    /// Never fails outward: AI errors fall back to deterministic matching,
    /// and on total failure an empty mapping is returned.
    pub async fn resolve(
        &self,
        project_id: &str,
        loose_fields: &BTreeMap<String, Value>,
        context: Option<&str>,
    ) -> MappedFieldSet {
        if loose_fields.is_empty() {
            return MappedFieldSet::new();
        }

        let fields = match self.catalog.get(project_id).await {
            Ok(fields) => fields,
            Err(e) => {
                warn!(project_id, error = %e, "could not fetch field definitions, skipping custom fields");
                return MappedFieldSet::new();
            }
        };
        if fields.is_empty() {
            warn!(project_id, "no field definitions configured for project");
            return MappedFieldSet::new();
        }

        let settable: Vec<&FieldDefinition> = fields
            .iter()
            .filter(|f| f.kind != FieldKind::Unsupported)
            .filter(|f| !EXCLUDED_FIELD_IDS.contains(&f.id.as_str()))
            .collect();

        let mapped = match self.map_with_ai(&settable, loose_fields, context).await {
            Ok(mapped) => mapped,
            Err(e) => {
                warn!(error = %e, "AI field mapping failed, falling back to exact name matching");
                exact_match_fallback(&settable, loose_fields)
            }
        };

        let mapped = postprocess(&fields, mapped);
        let validated = validate_against_catalog(&fields, mapped);
        info!(
            project_id,
            resolved = validated.len(),
            requested = loose_fields.len(),
            "field resolution complete"
        );
        validated
    }

    /// Primary path: ask the AI backend to map names and option values.
    async fn map_with_ai(
        &self,
        settable: &[&FieldDefinition],
        loose_fields: &BTreeMap<String, Value>,
        context: Option<&str>,
    ) -> Result<MappedFieldSet, BriefpilotError> {
        let prompt = build_mapping_prompt(settable, loose_fields, context);
        let response = self
            .provider
            .complete(CompletionRequest {
                model: self.model.clone(),
                prompt,
                max_tokens: MAPPING_MAX_TOKENS,
                temperature: MAPPING_TEMPERATURE,
            })
            .await?;

        // Same fence-tolerant extraction as brief parsing. A response that
        // parses but is not an object maps nothing; only a provider failure
        // triggers the deterministic fallback.
        let payload = strip_code_fence(&response.text);
        match serde_json::from_str::<Map<String, Value>>(payload) {
            Ok(object) => Ok(object.into_iter().collect()),
            Err(e) => {
                warn!(error = %e, "AI mapping response was not a JSON object");
                Ok(MappedFieldSet::new())
            }
        }
    }
}

/// Render the settable field catalogue and loose fields into the prompt.
fn build_mapping_prompt(
    settable: &[&FieldDefinition],
    loose_fields: &BTreeMap<String, Value>,
    context: Option<&str>,
) -> String {
    let fields_description: Vec<Value> = settable
        .iter()
        .map(|field| {
            let mut entry = json!({
                "id": field.id,
                "name": field.display_name,
                "kind": field.kind,
            });
            if field.kind.is_enum() {
                entry["options"] = field
                    .options
                    .iter()
                    .filter(|o| o.enabled)
                    .map(|o| json!({"id": o.id, "name": o.display_name}))
                    .collect();
            }
            entry
        })
        .collect();

    let context_block = context
        .map(|c| format!("<context>{c}</context>"))
        .unwrap_or_default();

    MAPPING_PROMPT
        .replace(
            "{fields}",
            &serde_json::to_string_pretty(&fields_description).unwrap_or_default(),
        )
        .replace(
            "{brief_fields}",
            &serde_json::to_string_pretty(loose_fields).unwrap_or_default(),
        )
        .replace("{context}", &context_block)
}

/// Deterministic fallback: case-insensitive exact name matching between
/// loose field keys and field display names, and between enum values and
/// option names. Multi-valued inputs map to the subset of matching options.
fn exact_match_fallback(
    settable: &[&FieldDefinition],
    loose_fields: &BTreeMap<String, Value>,
) -> MappedFieldSet {
    let by_name: BTreeMap<String, &FieldDefinition> = settable
        .iter()
        .map(|f| (f.display_name.to_lowercase(), *f))
        .collect();

    let mut mapped = MappedFieldSet::new();

    for (name, value) in loose_fields {
        let Some(field) = by_name.get(&name.to_lowercase()) else {
            continue;
        };

        if field.kind.is_enum() {
            let option_by_name: BTreeMap<String, &str> = field
                .options
                .iter()
                .map(|o| (o.display_name.to_lowercase(), o.id.as_str()))
                .collect();

            match value {
                Value::String(s) => {
                    if let Some(option_id) = option_by_name.get(&s.to_lowercase()) {
                        mapped.insert(field.id.clone(), json!(option_id));
                    }
                }
                Value::Array(values) => {
                    let option_ids: Vec<&str> = values
                        .iter()
                        .filter_map(Value::as_str)
                        .filter_map(|v| option_by_name.get(&v.to_lowercase()).copied())
                        .collect();
                    if !option_ids.is_empty() {
                        mapped.insert(field.id.clone(), json!(option_ids));
                    }
                }
                _ => {}
            }
        } else {
            mapped.insert(field.id.clone(), value.clone());
        }
    }

    debug!(mapped = mapped.len(), "fallback exact matching complete");
    mapped
}

/// Post-processing applied identically to both paths: strip excluded ids
/// and wrap bare date strings in the object shape the tracker requires.
fn postprocess(fields: &[FieldDefinition], mapped: MappedFieldSet) -> MappedFieldSet {
    let kind_by_id: BTreeMap<&str, FieldKind> =
        fields.iter().map(|f| (f.id.as_str(), f.kind)).collect();

    mapped
        .into_iter()
        .filter(|(id, _)| {
            let keep = !EXCLUDED_FIELD_IDS.contains(&id.as_str());
            if !keep {
                warn!(field_id = %id, "removing excluded field from mapping");
            }
            keep
        })
        .map(|(id, value)| {
            let wrapped = match (kind_by_id.get(id.as_str()), &value) {
                (Some(FieldKind::Date), Value::String(date)) => json!({ "date": date }),
                _ => value,
            };
            (id, wrapped)
        })
        .collect()
}

/// Drop entries the catalogue cannot account for: unknown field ids, enum
/// values outside the enabled option set, multi-enum entries whose enabled
/// subset is empty. Non-enum kinds pass through; the tracker does final
/// validation.
fn validate_against_catalog(
    fields: &[FieldDefinition],
    mapped: MappedFieldSet,
) -> MappedFieldSet {
    let by_id: BTreeMap<&str, &FieldDefinition> =
        fields.iter().map(|f| (f.id.as_str(), f)).collect();

    let mut validated = MappedFieldSet::new();

    for (id, value) in mapped {
        let Some(field) = by_id.get(id.as_str()) else {
            warn!(field_id = %id, "field id not in project catalogue, dropping");
            continue;
        };

        match field.kind {
            FieldKind::Enum => {
                let is_enabled = value
                    .as_str()
                    .map(|v| field.enabled_option_ids().any(|id| id == v))
                    .unwrap_or(false);
                if is_enabled {
                    validated.insert(id, value);
                } else {
                    warn!(field = %field.display_name, %value, "invalid enum option, dropping");
                }
            }
            FieldKind::MultiEnum => {
                let Some(values) = value.as_array() else {
                    warn!(field = %field.display_name, "multi-enum expects an array, dropping");
                    continue;
                };
                let enabled: Vec<Value> = values
                    .iter()
                    .filter(|v| {
                        v.as_str()
                            .map(|v| field.enabled_option_ids().any(|id| id == v))
                            .unwrap_or(false)
                    })
                    .cloned()
                    .collect();
                if !enabled.is_empty() {
                    validated.insert(id, Value::Array(enabled));
                }
            }
            _ => {
                validated.insert(id, value);
            }
        }
    }

    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefpilot_core::types::EnumOption;
    use briefpilot_test_utils::{RecordingTracker, ScriptedProvider};

    fn option(id: &str, name: &str, enabled: bool) -> EnumOption {
        EnumOption {
            id: id.into(),
            display_name: name.into(),
            enabled,
        }
    }

    fn field(id: &str, name: &str, kind: FieldKind, options: Vec<EnumOption>) -> FieldDefinition {
        FieldDefinition {
            id: id.into(),
            display_name: name.into(),
            kind,
            options,
        }
    }

    fn project_fields() -> Vec<FieldDefinition> {
        vec![
            field("100", "Client", FieldKind::Text, vec![]),
            field("200", "Send Date", FieldKind::Date, vec![]),
            field(
                "300",
                "Priority",
                FieldKind::Enum,
                vec![option("301", "High", true), option("302", "Low", true)],
            ),
            field(
                "400",
                "Channels",
                FieldKind::MultiEnum,
                vec![
                    option("401", "Email", true),
                    option("402", "SMS", true),
                    option("403", "Fax", false),
                ],
            ),
            field("500", "Record Id", FieldKind::Unsupported, vec![]),
            field(EXCLUDED_FIELD_IDS[0], "WIN", FieldKind::Text, vec![]),
        ]
    }

    fn resolver_with(provider: ScriptedProvider) -> FieldResolver {
        let tracker = Arc::new(RecordingTracker::new(project_fields(), Vec::new()));
        FieldResolver::new(
            Arc::new(provider),
            FieldCatalog::new(tracker),
            "map-model",
        )
    }

    fn loose(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn ai_path_maps_and_wraps_dates() {
        let provider = ScriptedProvider::with_responses(vec![
            r#"{"100": "Acme", "200": "2026-01-15", "300": "301"}"#.to_string(),
        ]);
        let resolver = resolver_with(provider);
        let mapped = resolver
            .resolve(
                "p1",
                &loose(&[
                    ("Client", json!("Acme")),
                    ("Send Date", json!("2026-01-15")),
                    ("Priority", json!("High")),
                ]),
                Some("Task: Email 1"),
            )
            .await;

        assert_eq!(mapped["100"], json!("Acme"));
        assert_eq!(mapped["200"], json!({"date": "2026-01-15"}));
        assert_eq!(mapped["300"], json!("301"));
    }

    #[tokio::test]
    async fn fallback_path_also_wraps_dates() {
        let resolver = resolver_with(ScriptedProvider::failing("quota exceeded"));
        let mapped = resolver
            .resolve("p1", &loose(&[("send date", json!("2026-01-15"))]), None)
            .await;
        assert_eq!(mapped["200"], json!({"date": "2026-01-15"}));
    }

    #[tokio::test]
    async fn excluded_id_never_survives_either_path() {
        // AI tries to set the excluded field directly.
        let provider = ScriptedProvider::with_responses(vec![format!(
            r#"{{"{}": "WIN-1234", "100": "Acme"}}"#,
            EXCLUDED_FIELD_IDS[0]
        )]);
        let resolver = resolver_with(provider);
        let mapped = resolver
            .resolve("p1", &loose(&[("Client", json!("Acme"))]), None)
            .await;
        assert!(!mapped.contains_key(EXCLUDED_FIELD_IDS[0]));
        assert!(mapped.contains_key("100"));

        // Fallback names the excluded field by display name.
        let resolver = resolver_with(ScriptedProvider::failing("down"));
        let mapped = resolver
            .resolve("p1", &loose(&[("WIN", json!("WIN-1234"))]), None)
            .await;
        assert!(!mapped.contains_key(EXCLUDED_FIELD_IDS[0]));
    }

    #[tokio::test]
    async fn fallback_matches_names_and_options_case_insensitively() {
        let resolver = resolver_with(ScriptedProvider::failing("down"));
        let mapped = resolver
            .resolve(
                "p1",
                &loose(&[("PRIORITY", json!("high")), ("client", json!("Acme"))]),
                None,
            )
            .await;
        assert_eq!(mapped["300"], json!("301"));
        assert_eq!(mapped["100"], json!("Acme"));
    }

    #[tokio::test]
    async fn multi_enum_keeps_only_enabled_subset() {
        let resolver = resolver_with(ScriptedProvider::failing("down"));
        let mapped = resolver
            .resolve(
                "p1",
                &loose(&[("Channels", json!(["Email", "Fax", "Pigeon"]))]),
                None,
            )
            .await;
        // "Fax" is disabled, "Pigeon" unknown; only Email's option survives.
        assert_eq!(mapped["400"], json!(["401"]));
    }

    #[tokio::test]
    async fn multi_enum_with_empty_subset_is_dropped() {
        let provider =
            ScriptedProvider::with_responses(vec![r#"{"400": ["403", "999"]}"#.to_string()]);
        let resolver = resolver_with(provider);
        let mapped = resolver
            .resolve("p1", &loose(&[("Channels", json!(["Fax"]))]), None)
            .await;
        assert!(mapped.is_empty());
    }

    #[tokio::test]
    async fn unknown_field_id_and_bad_enum_option_are_dropped() {
        let provider = ScriptedProvider::with_responses(vec![
            r#"{"999": "ghost", "300": "302-bogus", "100": "Acme"}"#.to_string(),
        ]);
        let resolver = resolver_with(provider);
        let mapped = resolver
            .resolve("p1", &loose(&[("Client", json!("Acme"))]), None)
            .await;
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped["100"], json!("Acme"));
    }

    #[tokio::test]
    async fn fenced_mapping_response_is_tolerated() {
        let provider = ScriptedProvider::with_responses(vec![
            "```json\n{\"100\": \"Acme\"}\n```".to_string(),
        ]);
        let resolver = resolver_with(provider);
        let mapped = resolver
            .resolve("p1", &loose(&[("Client", json!("Acme"))]), None)
            .await;
        assert_eq!(mapped["100"], json!("Acme"));
    }

    #[tokio::test]
    async fn catalogue_failure_resolves_to_empty_mapping() {
        let tracker = Arc::new(
            RecordingTracker::new(project_fields(), Vec::new())
                .fail_metadata(briefpilot_core::TrackerErrorKind::NotAuthorized),
        );
        let resolver = FieldResolver::new(
            Arc::new(ScriptedProvider::new()),
            FieldCatalog::new(tracker),
            "map-model",
        );
        let mapped = resolver
            .resolve("p1", &loose(&[("Client", json!("Acme"))]), None)
            .await;
        assert!(mapped.is_empty());
    }

    #[tokio::test]
    async fn prompt_omits_unsupported_and_excluded_fields() {
        let provider = ScriptedProvider::with_responses(vec!["{}".to_string()]);
        let tracker = Arc::new(RecordingTracker::new(project_fields(), Vec::new()));
        let provider = Arc::new(provider);
        let resolver = FieldResolver::new(
            provider.clone(),
            FieldCatalog::new(tracker),
            "map-model",
        );
        resolver
            .resolve("p1", &loose(&[("Client", json!("Acme"))]), None)
            .await;

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        let prompt = &requests[0].prompt;
        assert!(prompt.contains("\"Client\""));
        assert!(!prompt.contains("Record Id"));
        assert!(!prompt.contains(EXCLUDED_FIELD_IDS[0]));
        // Disabled options are not offered to the model either.
        assert!(!prompt.contains("\"Fax\""));
    }
}
