// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The batch orchestrator: parse a brief, then create one tracker item per
//! task, sequentially.
//!
//! Tasks are processed strictly one at a time; each task's field
//! resolution, creation, and attachment complete before the next begins.
//! A failure inside one task is recorded on that task's result and never
//! aborts the batch. Only a failure before the loop (document fetch, AI
//! backend unreachable) is fatal, and even that returns a result object
//! with the error recorded rather than propagating.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::{CompletionProvider, DocumentSource, TrackerAdapter};
use briefpilot_core::types::{
    BriefProcessingResult, CreatedItem, DocHeading, NewItem, ParsedCampaign, ParsedTask,
    TaskCreationResult, TaskPreview,
};
use briefpilot_fields::{FieldCatalog, FieldResolver};
use briefpilot_parser::BriefParser;

use crate::{linking, naming, notes, schedule};

/// Where rework tasks land when the caller supplies no alternate section.
pub const DEFAULT_REWORK_SECTION: &str = "1206874104264011";

/// Due dates are always this many business days out, regardless of the
/// task's send date.
const DUE_DATE_BUSINESS_DAYS: u32 = 2;

/// The fixed content-type value stamped onto every task's field bag.
const CONTENT_TYPE_VALUE: &str = "Campaign";

/// The display name of the brief attachment on each created item.
const ATTACHMENT_NAME: &str = "Campaign Brief";

/// One brief-processing request.
#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    pub document_url: String,
    pub project_id: String,
    /// Section for standard tasks. `None` files tasks unsectioned.
    pub section_id: Option<String>,
    /// Section for RESEND/UPCYCLE tasks; falls back to
    /// [`DEFAULT_REWORK_SECTION`].
    pub rework_section_id: Option<String>,
    /// Model override for parsing; `None` uses the parser's default.
    pub model: Option<String>,
    pub assignee_id: Option<String>,
    /// Extra operator instructions appended to the parsing prompt.
    pub instructions: Option<String>,
    /// Preview mode: parse and summarize, create nothing.
    pub dry_run: bool,
}

/// Drives the full brief-to-tasks flow across the three adapter seams.
pub struct TaskOrchestrator {
    docs: Arc<dyn DocumentSource>,
    tracker: Arc<dyn TrackerAdapter>,
    parser: BriefParser,
    resolver: FieldResolver,
    fixed_today: Option<NaiveDate>,
}

impl TaskOrchestrator {
    /// Wire an orchestrator over the given adapters. `default_model` is
    /// used for brief parsing, `mapping_model` for field resolution.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        docs: Arc<dyn DocumentSource>,
        tracker: Arc<dyn TrackerAdapter>,
        default_model: impl Into<String>,
        mapping_model: impl Into<String>,
    ) -> Self {
        let parser = BriefParser::new(Arc::clone(&provider), default_model);
        let resolver = FieldResolver::new(
            provider,
            FieldCatalog::new(Arc::clone(&tracker)),
            mapping_model,
        );
        Self {
            docs,
            tracker,
            parser,
            resolver,
            fixed_today: None,
        }
    }

    /// Pin "today" to a fixed date so due dates and priorities are
    /// deterministic. Tests only; production uses the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Process one brief end to end and aggregate the per-task outcomes.
    pub async fn process_brief(&self, request: &ProcessRequest) -> BriefProcessingResult {
        let mut result = BriefProcessingResult::default();

        let campaign = match self.parse_document(request).await {
            Ok(campaign) => campaign,
            Err(e) => {
                error!(error = %e, "brief processing aborted before any task was attempted");
                result.errors.push(format!("Fatal error: {e}"));
                return result;
            }
        };

        result.campaign_name = campaign.name.clone();
        result.total_tasks = campaign.tasks.len();

        if campaign.tasks.is_empty() {
            warn!("brief parsed but contained no tasks");
            result
                .errors
                .push("No tasks found in the brief document".to_string());
            return result;
        }

        if request.dry_run {
            info!(tasks = campaign.tasks.len(), "preview mode, creating nothing");
            result.preview = Some(build_preview(&campaign.tasks));
            return result;
        }

        // Heading extraction is best-effort: without headings every task
        // links to the plain document URL.
        let headings = match self.docs.fetch_headings(&request.document_url).await {
            Ok(headings) => {
                info!(count = headings.len(), "extracted document headings");
                headings
            }
            Err(e) => {
                warn!(error = %e, "could not extract document headings, using plain links");
                Vec::new()
            }
        };

        let mut counters = naming::ChannelCounters::new();
        for (idx, task) in campaign.tasks.iter().enumerate() {
            let number = idx + 1;
            let channel_seq = counters.advance(&task.message_type);
            info!(number, total = campaign.tasks.len(), task = %task.name, "processing task");
            let task_result = self
                .create_single_task(task, number, channel_seq, request, &headings)
                .await;
            if task_result.success {
                result.tasks_created += 1;
            } else {
                result.tasks_failed += 1;
            }
            result.results.push(task_result);
        }

        info!(
            created = result.tasks_created,
            failed = result.tasks_failed,
            "brief processing complete"
        );
        result
    }

    async fn parse_document(
        &self,
        request: &ProcessRequest,
    ) -> Result<ParsedCampaign, BriefpilotError> {
        info!(url = %request.document_url, "fetching brief document");
        let text = self.docs.fetch(&request.document_url).await?;
        self.parser
            .parse(
                &text,
                request.instructions.as_deref(),
                request.model.as_deref(),
            )
            .await
    }

    async fn create_single_task(
        &self,
        task: &ParsedTask,
        number: usize,
        channel_seq: usize,
        request: &ProcessRequest,
        headings: &[DocHeading],
    ) -> TaskCreationResult {
        let display_name = naming::format_display_name(task, number, channel_seq);
        let link = linking::resolve_deep_link(
            self.docs.as_ref(),
            &request.document_url,
            &task.name,
            headings,
        );

        let mut result = TaskCreationResult {
            task_number: number,
            task_name: display_name.clone(),
            success: false,
            remote_id: None,
            remote_url: None,
            error: None,
        };

        match self.submit_task(task, number, &display_name, &link, request).await {
            Ok(created) => {
                result.success = true;
                result.remote_id = Some(created.id.clone());
                result.remote_url = created.url;
                // Attachment failure never undoes a successful creation.
                if let Err(e) = self
                    .tracker
                    .attach_resource(&created.id, &link, ATTACHMENT_NAME)
                    .await
                {
                    warn!(item = %created.id, error = %e, "could not attach brief to created item");
                }
                info!(number, item = %created.id, "created task");
            }
            Err(e) => {
                error!(number, task = %display_name, error = %e, "task creation failed");
                result.error = Some(e.to_string());
            }
        }

        result
    }

    async fn submit_task(
        &self,
        task: &ParsedTask,
        number: usize,
        display_name: &str,
        link: &str,
        request: &ProcessRequest,
    ) -> Result<CreatedItem, BriefpilotError> {
        let notes = notes::build_task_notes(task, link);

        let loose = build_loose_fields(task, self.today());
        let fields = self
            .resolver
            .resolve(&request.project_id, &loose, Some(&format!("Task: {}", task.name)))
            .await;
        debug!(number, resolved = fields.len(), "resolved custom fields");

        let section_id = if task.is_rework() {
            let section = request
                .rework_section_id
                .clone()
                .unwrap_or_else(|| DEFAULT_REWORK_SECTION.to_string());
            info!(number, section, task_type = %task.task_type, "routing rework task");
            Some(section)
        } else {
            request.section_id.clone()
        };

        let due_on = schedule::business_days_from(self.today(), DUE_DATE_BUSINESS_DAYS)
            .format("%Y-%m-%d")
            .to_string();

        self.tracker
            .create_item(NewItem {
                name: display_name.to_string(),
                project_id: request.project_id.clone(),
                section_id,
                notes: Some(notes),
                fields: (!fields.is_empty()).then_some(fields),
                assignee_id: request.assignee_id.clone(),
                due_on: Some(due_on),
            })
            .await
    }
}

/// The loosely-named field bag handed to the resolver: every present task
/// attribute under its display name, the fixed content type, and the
/// derived priority and month. Task-level overrides merge last and win.
fn build_loose_fields(task: &ParsedTask, today: NaiveDate) -> BTreeMap<String, Value> {
    let mut bag = BTreeMap::new();

    let named: [(&str, &str); 7] = [
        ("Message Type", &task.message_type),
        ("Client", &task.client),
        ("Send Time", &task.send_time),
        ("Coupon Code", &task.coupon_code),
        ("Coupon Name", &task.coupon_name),
        ("Targeted Audiences", &task.targeted_audiences),
        ("Excluded Audiences", &task.excluded_audiences),
    ];
    for (name, value) in named {
        if !value.is_empty() {
            bag.insert(name.to_string(), Value::String(value.to_string()));
        }
    }
    if let Some(send_date) = &task.send_date {
        bag.insert("Send Date".to_string(), Value::String(send_date.clone()));
    }

    bag.insert(
        "Content Type".to_string(),
        Value::String(CONTENT_TYPE_VALUE.to_string()),
    );
    bag.insert(
        "Priority".to_string(),
        Value::String(schedule::calculate_priority(task.send_date.as_deref(), today).to_string()),
    );
    if let Some(month) = schedule::month_name(task.send_date.as_deref()) {
        bag.insert("Month".to_string(), Value::String(month));
    }

    for (name, value) in &task.custom_fields {
        bag.insert(name.clone(), value.clone());
    }

    bag
}

/// The lightweight per-task summary returned in preview mode.
fn build_preview(tasks: &[ParsedTask]) -> Vec<TaskPreview> {
    tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| TaskPreview {
            number: idx + 1,
            name: task.name.clone(),
            message_type: task.message_type.clone(),
            send_date: task.send_date.clone(),
            has_subject: !task.subject.is_empty(),
            has_copy: !task.copy.is_empty(),
        })
        .collect()
}
