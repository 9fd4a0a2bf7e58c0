// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Briefpilot collaborator seams.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod document;
pub mod provider;
pub mod tracker;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use document::DocumentSource;
pub use provider::CompletionProvider;
pub use tracker::TrackerAdapter;
