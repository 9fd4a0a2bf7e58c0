// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracker adapter trait for the external project-tracking service.

use async_trait::async_trait;

use crate::error::BriefpilotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Attachment, CreatedItem, FieldDefinition, NewItem, Section};

/// Adapter for the external task-tracking API.
///
/// Authentication and not-found failures on the read paths propagate as
/// typed [`BriefpilotError::Tracker`] errors; the orchestrator catches
/// creation and attachment failures per task instead of propagating them.
#[async_trait]
pub trait TrackerAdapter: PluginAdapter {
    /// Fetches the field definitions configured for a project.
    async fn field_definitions(
        &self,
        project_id: &str,
    ) -> Result<Vec<FieldDefinition>, BriefpilotError>;

    /// Fetches the sections of a project.
    async fn sections(&self, project_id: &str) -> Result<Vec<Section>, BriefpilotError>;

    /// Creates one item and returns its remote handle.
    async fn create_item(&self, item: NewItem) -> Result<CreatedItem, BriefpilotError>;

    /// Attaches an external resource to a created item. Returns `None` when
    /// the tracker accepted the request but reported no attachment body.
    async fn attach_resource(
        &self,
        item_id: &str,
        url: &str,
        name: &str,
    ) -> Result<Option<Attachment>, BriefpilotError>;
}
