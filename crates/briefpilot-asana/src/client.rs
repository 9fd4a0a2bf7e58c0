// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Asana REST API.
//!
//! Covers the endpoints the pipeline needs: project custom field settings,
//! project sections, task creation, and external attachments. HTTP failures
//! map to typed tracker errors with remediation hints.

use briefpilot_core::error::{BriefpilotError, TrackerErrorKind};
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::types::{
    ApiAttachment, ApiCustomField, ApiSection, ApiTask, AttachmentPayload, CustomFieldSetting,
    Envelope, TaskPayload,
};

/// Base URL for the Asana REST API.
const API_BASE_URL: &str = "https://app.asana.com/api/1.0";

const CUSTOM_FIELD_OPT_FIELDS: &str = "custom_field.gid,custom_field.name,\
custom_field.resource_subtype,custom_field.enum_options.gid,\
custom_field.enum_options.name,custom_field.enum_options.enabled";

/// HTTP client for Asana API communication.
#[derive(Debug, Clone)]
pub struct AsanaClient {
    client: reqwest::Client,
    base_url: String,
}

impl AsanaClient {
    /// Creates a new Asana API client authenticating with the given
    /// personal access token.
    pub fn new(access_token: &str) -> Result<Self, BriefpilotError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|e| {
            BriefpilotError::Config(format!("invalid access token header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BriefpilotError::tracker(
                TrackerErrorKind::Unknown,
                format!("failed to build HTTP client: {e}"),
                "this is a local environment problem, not an Asana one",
            ))?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Fetch the custom field definitions configured on a project.
    pub async fn custom_fields(
        &self,
        project_gid: &str,
    ) -> Result<Vec<ApiCustomField>, BriefpilotError> {
        let url = format!("{}/projects/{project_gid}/custom_field_settings", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("opt_fields", CUSTOM_FIELD_OPT_FIELDS)])
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response, &format!("fetching custom fields for project {project_gid}")).await?;

        let envelope: Envelope<Vec<CustomFieldSetting>> =
            response.json().await.map_err(decode_error)?;

        let fields: Vec<ApiCustomField> = envelope
            .data
            .into_iter()
            .filter_map(|setting| setting.custom_field)
            .collect();
        debug!(project_gid, count = fields.len(), "fetched custom fields");
        Ok(fields)
    }

    /// Fetch the sections of a project.
    pub async fn sections(&self, project_gid: &str) -> Result<Vec<ApiSection>, BriefpilotError> {
        let url = format!("{}/projects/{project_gid}/sections", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("opt_fields", "name,gid")])
            .send()
            .await
            .map_err(request_error)?;
        let response =
            check_status(response, &format!("fetching sections for project {project_gid}")).await?;

        let envelope: Envelope<Vec<ApiSection>> = response.json().await.map_err(decode_error)?;
        debug!(project_gid, count = envelope.data.len(), "fetched sections");
        Ok(envelope.data)
    }

    /// Create a task.
    pub async fn create_task(&self, payload: TaskPayload) -> Result<ApiTask, BriefpilotError> {
        let url = format!("{}/tasks", self.base_url);
        let name = payload.name.clone();
        let response = self
            .client
            .post(&url)
            .json(&Envelope { data: payload })
            .send()
            .await
            .map_err(request_error)?;
        let response = check_status(response, &format!("creating task '{name}'")).await?;

        let envelope: Envelope<ApiTask> = response.json().await.map_err(decode_error)?;
        info!(task_gid = envelope.data.gid, name, "created task");
        Ok(envelope.data)
    }

    /// Attach an external resource (like a Google Doc) to a task.
    ///
    /// Google Drive/Docs URLs use the "google" resource subtype for Asana's
    /// Drive integration. If that subtype is rejected, the attachment is
    /// retried as a plain "external" link.
    pub async fn attach_resource(
        &self,
        task_gid: &str,
        resource_url: &str,
        name: Option<&str>,
    ) -> Result<ApiAttachment, BriefpilotError> {
        let subtype = if resource_url.contains("docs.google.com")
            || resource_url.contains("drive.google.com")
        {
            "google"
        } else {
            "external"
        };

        match self.post_attachment(task_gid, resource_url, name, subtype).await {
            Ok(attachment) => Ok(attachment),
            Err(e) if subtype == "google" => {
                warn!(task_gid, error = %e, "google attachment rejected, retrying as external");
                self.post_attachment(task_gid, resource_url, name, "external")
                    .await
            }
            Err(e) => Err(e),
        }
    }

    async fn post_attachment(
        &self,
        task_gid: &str,
        resource_url: &str,
        name: Option<&str>,
        subtype: &str,
    ) -> Result<ApiAttachment, BriefpilotError> {
        let url = format!("{}/attachments", self.base_url);
        let payload = AttachmentPayload {
            parent: task_gid.to_string(),
            resource_subtype: subtype.to_string(),
            url: resource_url.to_string(),
            name: name.map(str::to_string),
        };
        let response = self
            .client
            .post(&url)
            .json(&Envelope { data: payload })
            .send()
            .await
            .map_err(request_error)?;
        let response =
            check_status(response, &format!("attaching resource to task {task_gid}")).await?;

        let envelope: Envelope<ApiAttachment> = response.json().await.map_err(decode_error)?;
        info!(task_gid, subtype, "attached resource");
        Ok(envelope.data)
    }
}

/// Map an HTTP error status to a typed tracker error with a hint.
async fn check_status(
    response: reqwest::Response,
    context: &str,
) -> Result<reqwest::Response, BriefpilotError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (kind, hint) = match status.as_u16() {
        404 => (
            TrackerErrorKind::NotFound,
            "check the gid and confirm the resource exists in your workspace",
        ),
        401 | 403 => (
            TrackerErrorKind::NotAuthorized,
            "check that your Asana access token is valid and has access to this project",
        ),
        _ => (
            TrackerErrorKind::Unknown,
            "see the Asana response body for details",
        ),
    };
    Err(BriefpilotError::tracker(
        kind,
        format!("{context}: Asana returned {status}: {body}"),
        hint,
    ))
}

fn request_error(e: reqwest::Error) -> BriefpilotError {
    BriefpilotError::tracker(
        TrackerErrorKind::Unknown,
        format!("HTTP request failed: {e}"),
        "check network connectivity to app.asana.com",
    )
}

fn decode_error(e: reqwest::Error) -> BriefpilotError {
    BriefpilotError::tracker(
        TrackerErrorKind::Unknown,
        format!("failed to decode Asana response: {e}"),
        "the Asana API may have changed shape",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param_contains};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> AsanaClient {
        AsanaClient::new("test-token")
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn custom_fields_extracts_definitions() {
        let server = MockServer::start().await;

        let body = json!({"data": [
            {"custom_field": {
                "gid": "100",
                "name": "Client",
                "resource_subtype": "text"
            }},
            {"custom_field": {
                "gid": "300",
                "name": "Priority",
                "resource_subtype": "enum",
                "enum_options": [{"gid": "301", "name": "High", "enabled": true}]
            }},
            {}
        ]});

        Mock::given(method("GET"))
            .and(path("/projects/p1/custom_field_settings"))
            .and(query_param_contains("opt_fields", "custom_field.gid"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let fields = test_client(&server.uri()).custom_fields("p1").await.unwrap();
        // The empty setting without a custom_field is skipped.
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].gid, "100");
        assert_eq!(fields[1].enum_options.as_ref().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sections_returns_gid_and_name() {
        let server = MockServer::start().await;

        let body = json!({"data": [
            {"gid": "s1", "name": "Inbox"},
            {"gid": "s2", "name": "Rework"}
        ]});

        Mock::given(method("GET"))
            .and(path("/projects/p1/sections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let sections = test_client(&server.uri()).sections("p1").await.unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].name, "Rework");
    }

    #[tokio::test]
    async fn create_task_sends_enveloped_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/tasks"))
            .and(body_partial_json(json!({"data": {
                "name": "New task",
                "projects": ["p1"],
                "memberships": [{"project": "p1", "section": "s1"}],
                "due_on": "2026-01-05"
            }})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {
                "gid": "t1",
                "permalink_url": "https://app.asana.com/0/p1/t1"
            }})))
            .mount(&server)
            .await;

        let payload = TaskPayload {
            name: "New task".into(),
            projects: vec!["p1".into()],
            notes: Some("notes".into()),
            assignee: None,
            due_on: Some("2026-01-05".into()),
            memberships: Some(vec![crate::types::Membership {
                project: "p1".into(),
                section: "s1".into(),
            }]),
            custom_fields: None,
        };

        let task = test_client(&server.uri()).create_task(payload).await.unwrap();
        assert_eq!(task.gid, "t1");
        assert_eq!(
            task.permalink_url.as_deref(),
            Some("https://app.asana.com/0/p1/t1")
        );
    }

    #[tokio::test]
    async fn missing_project_maps_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/ghost/sections"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{"message": "project: Not a recognized ID: ghost"}]
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .sections("ghost")
            .await
            .unwrap_err();
        match err {
            BriefpilotError::Tracker { kind, hint, .. } => {
                assert_eq!(kind, TrackerErrorKind::NotFound);
                assert!(hint.contains("gid"));
            }
            other => panic!("expected Tracker error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn forbidden_maps_to_not_authorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/p1/custom_field_settings"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errors": [{"message": "Forbidden"}]
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .custom_fields("p1")
            .await
            .unwrap_err();
        match err {
            BriefpilotError::Tracker { kind, .. } => {
                assert_eq!(kind, TrackerErrorKind::NotAuthorized);
            }
            other => panic!("expected Tracker error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn google_url_uses_google_subtype() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/attachments"))
            .and(body_partial_json(json!({"data": {
                "parent": "t1",
                "resource_subtype": "google",
                "url": "https://docs.google.com/document/d/abc",
                "name": "Campaign Brief"
            }})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "a1"}})))
            .mount(&server)
            .await;

        let attachment = test_client(&server.uri())
            .attach_resource("t1", "https://docs.google.com/document/d/abc", Some("Campaign Brief"))
            .await
            .unwrap();
        assert_eq!(attachment.gid, "a1");
    }

    #[tokio::test]
    async fn rejected_google_subtype_falls_back_to_external() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/attachments"))
            .and(body_partial_json(json!({"data": {"resource_subtype": "google"}})))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{"message": "google subtype not available"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/attachments"))
            .and(body_partial_json(json!({"data": {"resource_subtype": "external"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "a2"}})))
            .mount(&server)
            .await;

        let attachment = test_client(&server.uri())
            .attach_resource("t1", "https://drive.google.com/file/d/xyz", None)
            .await
            .unwrap();
        assert_eq!(attachment.gid, "a2");
    }

    #[tokio::test]
    async fn plain_url_failure_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/attachments"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{"message": "bad url"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .attach_resource("t1", "https://example.com/brief", None)
            .await;
        assert!(result.is_err());
    }
}
