// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-project memoized field definition catalogue.
//!
//! Populated on first use per project id, explicitly invalidatable. The
//! cache is read-mostly; concurrent misses may fetch redundantly, which is
//! wasted work, not a correctness hazard (last writer wins).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::TrackerAdapter;
use briefpilot_core::types::FieldDefinition;

/// Cache of tracker field definitions, keyed by project id.
pub struct FieldCatalog {
    tracker: Arc<dyn TrackerAdapter>,
    cache: RwLock<HashMap<String, Arc<Vec<FieldDefinition>>>>,
}

impl FieldCatalog {
    /// Create an empty catalogue over the given tracker.
    pub fn new(tracker: Arc<dyn TrackerAdapter>) -> Self {
        Self {
            tracker,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Field definitions for a project, fetched on first use.
    pub async fn get(
        &self,
        project_id: &str,
    ) -> Result<Arc<Vec<FieldDefinition>>, BriefpilotError> {
        if let Some(fields) = self.cache.read().await.get(project_id) {
            debug!(project_id, "using cached field definitions");
            return Ok(Arc::clone(fields));
        }
        self.refresh(project_id).await
    }

    /// Fetch fresh definitions, bypassing and repopulating the cache.
    pub async fn refresh(
        &self,
        project_id: &str,
    ) -> Result<Arc<Vec<FieldDefinition>>, BriefpilotError> {
        info!(project_id, "fetching field definitions");
        let fields = Arc::new(self.tracker.field_definitions(project_id).await?);
        self.cache
            .write()
            .await
            .insert(project_id.to_string(), Arc::clone(&fields));
        Ok(fields)
    }

    /// Drop the cached definitions for a project, if any.
    pub async fn invalidate(&self, project_id: &str) {
        self.cache.write().await.remove(project_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefpilot_core::types::FieldKind;
    use briefpilot_test_utils::RecordingTracker;

    fn sample_field() -> FieldDefinition {
        FieldDefinition {
            id: "f1".into(),
            display_name: "Client".into(),
            kind: FieldKind::Text,
            options: Vec::new(),
        }
    }

    #[tokio::test]
    async fn second_get_is_served_from_cache() {
        let tracker = Arc::new(RecordingTracker::new(vec![sample_field()], Vec::new()));
        let catalog = FieldCatalog::new(tracker.clone());

        let first = catalog.get("p1").await.unwrap();
        let second = catalog.get("p1").await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(tracker.field_fetch_count(), 1);
    }

    #[tokio::test]
    async fn projects_are_cached_independently() {
        let tracker = Arc::new(RecordingTracker::new(vec![sample_field()], Vec::new()));
        let catalog = FieldCatalog::new(tracker.clone());

        catalog.get("p1").await.unwrap();
        catalog.get("p2").await.unwrap();
        catalog.get("p1").await.unwrap();
        assert_eq!(tracker.field_fetch_count(), 2);
    }

    #[tokio::test]
    async fn refresh_bypasses_the_cache() {
        let tracker = Arc::new(RecordingTracker::new(vec![sample_field()], Vec::new()));
        let catalog = FieldCatalog::new(tracker.clone());

        catalog.get("p1").await.unwrap();
        catalog.refresh("p1").await.unwrap();
        assert_eq!(tracker.field_fetch_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let tracker = Arc::new(RecordingTracker::new(vec![sample_field()], Vec::new()));
        let catalog = FieldCatalog::new(tracker.clone());

        catalog.get("p1").await.unwrap();
        catalog.invalidate("p1").await;
        catalog.get("p1").await.unwrap();
        assert_eq!(tracker.field_fetch_count(), 2);
    }
}
