// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pre-flight verification of project and section ids.

use serde::Serialize;
use tracing::info;

use briefpilot_core::traits::TrackerAdapter;

/// Outcome of a project/section verification run. `errors` carries the
/// user-facing messages, each with its remediation hint when the tracker
/// supplied one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationReport {
    pub project_exists: bool,
    pub section_exists: bool,
    pub section_name: Option<String>,
    pub field_count: usize,
    pub errors: Vec<String>,
}

/// Check that a project is reachable (by fetching its field definitions)
/// and, when given, that the section id exists within it. Tracker failures
/// are collected into the report rather than propagated.
pub async fn verify_project_and_section(
    tracker: &dyn TrackerAdapter,
    project_id: &str,
    section_id: Option<&str>,
) -> VerificationReport {
    let mut report = VerificationReport::default();

    let fields = match tracker.field_definitions(project_id).await {
        Ok(fields) => fields,
        Err(e) => {
            report.errors.push(describe(&e));
            return report;
        }
    };
    report.project_exists = true;
    report.field_count = fields.len();
    info!(project_id, fields = report.field_count, "project verified");

    let Some(section_id) = section_id else {
        return report;
    };

    match tracker.sections(project_id).await {
        Ok(sections) => {
            match sections.into_iter().find(|s| s.id == section_id) {
                Some(section) => {
                    report.section_exists = true;
                    report.section_name = Some(section.name);
                }
                None => report
                    .errors
                    .push(format!("section {section_id} not found in project {project_id}")),
            }
        }
        Err(e) => report.errors.push(describe(&e)),
    }

    report
}

fn describe(error: &briefpilot_core::BriefpilotError) -> String {
    match error.remediation() {
        Some(hint) => format!("{error} ({hint})"),
        None => error.to_string(),
    }
}
