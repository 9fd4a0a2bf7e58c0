// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock tracker that serves canned metadata and records created items.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use briefpilot_core::error::{BriefpilotError, TrackerErrorKind};
use briefpilot_core::traits::{PluginAdapter, TrackerAdapter};
use briefpilot_core::types::{
    AdapterType, Attachment, CreatedItem, FieldDefinition, NewItem, Section,
};

/// A recorded attachment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAttachment {
    pub item_id: String,
    pub url: String,
    pub name: String,
}

/// A mock tracker adapter for batch-processing tests.
///
/// Serves caller-supplied field definitions and sections, records every
/// created item and attachment, and can be told to fail a specific
/// creation (1-based index) or all attachments.
pub struct RecordingTracker {
    fields: Vec<FieldDefinition>,
    sections: Vec<Section>,
    created: Arc<Mutex<Vec<NewItem>>>,
    attachments: Arc<Mutex<Vec<RecordedAttachment>>>,
    fail_on_create: Option<usize>,
    fail_attachments: bool,
    fail_metadata: Option<TrackerErrorKind>,
    field_fetches: AtomicUsize,
    create_attempts: AtomicUsize,
}

impl RecordingTracker {
    /// Create a tracker with the given project metadata.
    pub fn new(fields: Vec<FieldDefinition>, sections: Vec<Section>) -> Self {
        Self {
            fields,
            sections,
            created: Arc::new(Mutex::new(Vec::new())),
            attachments: Arc::new(Mutex::new(Vec::new())),
            fail_on_create: None,
            fail_attachments: false,
            fail_metadata: None,
            field_fetches: AtomicUsize::new(0),
            create_attempts: AtomicUsize::new(0),
        }
    }

    /// Fail the n-th (1-based) `create_item` call.
    pub fn fail_create_at(mut self, index: usize) -> Self {
        self.fail_on_create = Some(index);
        self
    }

    /// Fail every `attach_resource` call.
    pub fn fail_attachments(mut self) -> Self {
        self.fail_attachments = true;
        self
    }

    /// Fail the metadata read paths with the given typed error kind.
    pub fn fail_metadata(mut self, kind: TrackerErrorKind) -> Self {
        self.fail_metadata = Some(kind);
        self
    }

    /// Items created so far, in submission order.
    pub async fn created_items(&self) -> Vec<NewItem> {
        self.created.lock().await.clone()
    }

    /// Attachments recorded so far.
    pub async fn attachments(&self) -> Vec<RecordedAttachment> {
        self.attachments.lock().await.clone()
    }

    /// How many times `field_definitions` was called (for cache tests).
    pub fn field_fetch_count(&self) -> usize {
        self.field_fetches.load(Ordering::SeqCst)
    }

    fn metadata_guard(&self) -> Result<(), BriefpilotError> {
        match self.fail_metadata {
            Some(kind) => Err(BriefpilotError::tracker(
                kind,
                "scripted metadata failure",
                "this is a test fixture",
            )),
            None => Ok(()),
        }
    }
}

impl PluginAdapter for RecordingTracker {
    fn name(&self) -> &str {
        "recording-tracker"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Tracker
    }
}

#[async_trait]
impl TrackerAdapter for RecordingTracker {
    async fn field_definitions(
        &self,
        _project_id: &str,
    ) -> Result<Vec<FieldDefinition>, BriefpilotError> {
        self.field_fetches.fetch_add(1, Ordering::SeqCst);
        self.metadata_guard()?;
        Ok(self.fields.clone())
    }

    async fn sections(&self, _project_id: &str) -> Result<Vec<Section>, BriefpilotError> {
        self.metadata_guard()?;
        Ok(self.sections.clone())
    }

    async fn create_item(&self, item: NewItem) -> Result<CreatedItem, BriefpilotError> {
        // Fail by attempt position, not by how many creations succeeded,
        // so a rejected attempt does not make every later one fail too.
        let attempt = self.create_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_create == Some(attempt) {
            return Err(BriefpilotError::tracker(
                TrackerErrorKind::Unknown,
                format!("scripted creation failure for item {attempt}"),
                "this is a test fixture",
            ));
        }
        self.created.lock().await.push(item);
        Ok(CreatedItem {
            id: format!("item-{attempt}"),
            url: Some(format!("https://tracker.example/items/item-{attempt}")),
        })
    }

    async fn attach_resource(
        &self,
        item_id: &str,
        url: &str,
        name: &str,
    ) -> Result<Option<Attachment>, BriefpilotError> {
        if self.fail_attachments {
            return Err(BriefpilotError::tracker(
                TrackerErrorKind::Unknown,
                "scripted attachment failure",
                "this is a test fixture",
            ));
        }
        let mut attachments = self.attachments.lock().await;
        attachments.push(RecordedAttachment {
            item_id: item_id.to_string(),
            url: url.to_string(),
            name: name.to_string(),
        });
        Ok(Some(Attachment {
            id: format!("att-{}", attachments.len()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            project_id: "p1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn only_the_targeted_creation_attempt_fails() {
        let tracker = RecordingTracker::new(Vec::new(), Vec::new()).fail_create_at(1);
        assert!(tracker.create_item(item("first")).await.is_err());
        let second = tracker.create_item(item("second")).await.unwrap();
        assert_eq!(second.id, "item-2");

        let created = tracker.created_items().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "second");
    }

    #[tokio::test]
    async fn mid_batch_failure_counts_attempts_not_successes() {
        let tracker = RecordingTracker::new(Vec::new(), Vec::new()).fail_create_at(2);
        assert!(tracker.create_item(item("first")).await.is_ok());
        assert!(tracker.create_item(item("second")).await.is_err());
        assert!(tracker.create_item(item("third")).await.is_ok());
        assert_eq!(tracker.created_items().await.len(), 2);
    }
}
