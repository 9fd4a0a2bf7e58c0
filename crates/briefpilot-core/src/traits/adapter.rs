// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait implemented by every external collaborator.

use crate::types::AdapterType;

/// The base trait for all Briefpilot adapters.
///
/// Every adapter (AI provider, document source, tracker) implements this,
/// which provides identity for logging and wiring diagnostics.
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the type of adapter (provider, document, tracker).
    fn adapter_type(&self) -> AdapterType;
}
