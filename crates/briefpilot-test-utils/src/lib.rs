// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Briefpilot integration tests.
//!
//! Provides mock implementations of all three adapter seams so the full
//! pipeline can be driven in fast, CI-runnable tests without external
//! API calls.

pub mod recording_tracker;
pub mod scripted_provider;
pub mod static_docs;

pub use recording_tracker::{RecordedAttachment, RecordingTracker};
pub use scripted_provider::ScriptedProvider;
pub use static_docs::StaticDocs;
