// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for AI completion backends.

use async_trait::async_trait;

use crate::error::BriefpilotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for AI completion backends.
///
/// The backend is treated as unreliable: callers must tolerate non-JSON or
/// truncated output. The pipeline only ever uses single-shot completions.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends a completion request and returns the full response text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BriefpilotError>;
}
