// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Briefpilot brief-to-task pipeline.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Briefpilot workspace. All collaborator
//! adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BriefpilotError, TrackerErrorKind};
pub use types::{
    BriefProcessingResult, CompletionRequest, CompletionResponse, DocHeading, FieldDefinition,
    FieldKind, MappedFieldSet, ParsedCampaign, ParsedTask, TaskCreationResult,
};

// Re-export all adapter traits at crate root.
pub use traits::{CompletionProvider, DocumentSource, PluginAdapter, TrackerAdapter};
