// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asana tracker adapter for Briefpilot.
//!
//! Implements [`TrackerAdapter`] over the Asana REST API: custom field
//! settings, sections, task creation with memberships and custom fields,
//! and external resource attachments.

pub mod client;
pub mod types;

use async_trait::async_trait;
use briefpilot_config::AsanaConfig;
use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::{PluginAdapter, TrackerAdapter};
use briefpilot_core::types::{
    AdapterType, Attachment, CreatedItem, FieldDefinition, NewItem, Section,
};
use tracing::info;

use crate::client::AsanaClient;
use crate::types::{Membership, TaskPayload};

/// Asana tracker implementing [`TrackerAdapter`].
///
/// Token resolution order: config -> `ASANA_ACCESS_TOKEN` env var -> error.
pub struct AsanaTracker {
    client: AsanaClient,
}

impl AsanaTracker {
    /// Creates a new Asana tracker from the given configuration.
    pub fn new(config: &AsanaConfig) -> Result<Self, BriefpilotError> {
        let access_token = resolve_access_token(&config.access_token)?;
        let client = AsanaClient::new(&access_token)?;
        info!("Asana tracker initialized");
        Ok(Self { client })
    }

    /// Creates a tracker with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: AsanaClient) -> Self {
        Self { client }
    }
}

impl PluginAdapter for AsanaTracker {
    fn name(&self) -> &str {
        "asana"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Tracker
    }
}

#[async_trait]
impl TrackerAdapter for AsanaTracker {
    async fn field_definitions(
        &self,
        project_id: &str,
    ) -> Result<Vec<FieldDefinition>, BriefpilotError> {
        let fields = self.client.custom_fields(project_id).await?;
        Ok(fields.into_iter().map(FieldDefinition::from).collect())
    }

    async fn sections(&self, project_id: &str) -> Result<Vec<Section>, BriefpilotError> {
        let sections = self.client.sections(project_id).await?;
        Ok(sections.into_iter().map(Section::from).collect())
    }

    async fn create_item(&self, item: NewItem) -> Result<CreatedItem, BriefpilotError> {
        let memberships = item.section_id.map(|section| {
            vec![Membership {
                project: item.project_id.clone(),
                section,
            }]
        });

        let payload = TaskPayload {
            name: item.name,
            projects: vec![item.project_id],
            notes: item.notes,
            assignee: item.assignee_id,
            due_on: item.due_on,
            memberships,
            custom_fields: item
                .fields
                .filter(|f| !f.is_empty())
                .map(|f| serde_json::to_value(f).unwrap_or_default()),
        };

        let task = self.client.create_task(payload).await?;
        Ok(CreatedItem {
            id: task.gid,
            url: task.permalink_url,
        })
    }

    async fn attach_resource(
        &self,
        item_id: &str,
        url: &str,
        name: &str,
    ) -> Result<Option<Attachment>, BriefpilotError> {
        let attachment = self.client.attach_resource(item_id, url, Some(name)).await?;
        Ok(Some(Attachment { id: attachment.gid }))
    }
}

/// Resolves the access token from config or environment.
fn resolve_access_token(config_token: &Option<String>) -> Result<String, BriefpilotError> {
    if let Some(token) = config_token
        && !token.is_empty()
    {
        return Ok(token.clone());
    }

    std::env::var("ASANA_ACCESS_TOKEN").map_err(|_| {
        BriefpilotError::Config(
            "Asana access token not found. Set asana.access_token in config or ASANA_ACCESS_TOKEN environment variable.".into(),
        )
    })
}
