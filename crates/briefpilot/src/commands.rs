// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations: adapter wiring and result rendering.

use std::sync::Arc;

use tracing::info;

use briefpilot_anthropic::AnthropicProvider;
use briefpilot_asana::AsanaTracker;
use briefpilot_config::BriefpilotConfig;
use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::TrackerAdapter;
use briefpilot_pipeline::{ProcessRequest, TaskOrchestrator, verify_project_and_section};

use crate::RunArgs;
use crate::file_docs::FileDocs;

/// Process a brief (or preview it) and print the aggregate result as JSON.
/// Exits non-zero when the batch recorded a fatal error or any task failed.
pub async fn run(
    config: &BriefpilotConfig,
    args: &RunArgs,
    dry_run: bool,
) -> Result<(), BriefpilotError> {
    let provider = Arc::new(AnthropicProvider::new(&config.anthropic)?);
    let tracker = Arc::new(AsanaTracker::new(&config.asana)?);

    let orchestrator = TaskOrchestrator::new(
        provider,
        Arc::new(FileDocs::new()),
        tracker,
        config.anthropic.default_model.clone(),
        config.anthropic.mapping_model(),
    );

    let request = ProcessRequest {
        document_url: args.document.clone(),
        project_id: resolve_project(config, args.project.as_deref())?,
        section_id: args
            .section
            .clone()
            .or_else(|| config.asana.default_section.clone()),
        rework_section_id: args
            .rework_section
            .clone()
            .or_else(|| Some(config.asana.rework_section.clone())),
        model: args.model.clone(),
        assignee_id: args.assignee.clone().or_else(|| config.asana.assignee.clone()),
        instructions: load_instructions(config)?,
        dry_run,
    };

    info!(document = %request.document_url, project = %request.project_id, dry_run, "processing brief");
    let result = orchestrator.process_brief(&request).await;
    print_json(&result)?;

    if !result.errors.is_empty() || result.tasks_failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Check that the project and section are reachable and print the report.
pub async fn verify(
    config: &BriefpilotConfig,
    project: Option<&str>,
    section: Option<&str>,
) -> Result<(), BriefpilotError> {
    let tracker = AsanaTracker::new(&config.asana)?;
    let project_id = resolve_project(config, project)?;
    let section_id = section
        .map(str::to_string)
        .or_else(|| config.asana.default_section.clone());

    let report = verify_project_and_section(&tracker, &project_id, section_id.as_deref()).await;
    print_json(&report)?;

    if !report.errors.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

/// List the custom field definitions configured for a project.
pub async fn fields(
    config: &BriefpilotConfig,
    project: Option<&str>,
) -> Result<(), BriefpilotError> {
    let tracker = AsanaTracker::new(&config.asana)?;
    let project_id = resolve_project(config, project)?;
    let definitions = tracker.field_definitions(&project_id).await?;
    print_json(&definitions)
}

fn resolve_project(
    config: &BriefpilotConfig,
    flag: Option<&str>,
) -> Result<String, BriefpilotError> {
    flag.map(str::to_string)
        .or_else(|| config.asana.default_project.clone())
        .ok_or_else(|| {
            BriefpilotError::Config(
                "no project id: pass --project or set asana.default_project".to_string(),
            )
        })
}

/// Extraction instructions from config: a file wins over the inline text.
fn load_instructions(config: &BriefpilotConfig) -> Result<Option<String>, BriefpilotError> {
    if let Some(path) = &config.pipeline.instructions_file {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BriefpilotError::Config(format!("could not read instructions file {path}: {e}"))
        })?;
        return Ok(Some(text));
    }
    Ok(config.pipeline.instructions.clone())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), BriefpilotError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| BriefpilotError::Internal(format!("could not render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}
