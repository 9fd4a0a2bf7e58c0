// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch orchestration for the Briefpilot pipeline.
//!
//! [`TaskOrchestrator`] ties the adapter seams together: fetch a brief,
//! parse it, and turn each extracted task into a tracker item with a
//! formatted display name, assembled notes, resolved custom fields, a
//! routing section, a business-day due date, and a deep link back to the
//! source document. Batches are partial-failure tolerant end to end.

pub mod linking;
pub mod naming;
pub mod notes;
pub mod orchestrator;
pub mod schedule;
pub mod verify;

pub use orchestrator::{DEFAULT_REWORK_SECTION, ProcessRequest, TaskOrchestrator};
pub use verify::{VerificationReport, verify_project_and_section};
