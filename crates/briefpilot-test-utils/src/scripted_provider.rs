// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock AI provider with pre-configured responses for deterministic tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::{CompletionProvider, PluginAdapter};
use briefpilot_core::types::{AdapterType, CompletionRequest, CompletionResponse, TokenUsage};

/// A mock completion provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a
/// default "scripted response" text is returned. Every request is recorded
/// so tests can assert on prompts, models, and sampling parameters. A
/// provider built with [`ScriptedProvider::failing`] errors on every call.
pub struct ScriptedProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    failure: Option<String>,
}

impl ScriptedProvider {
    /// Create a provider with an empty response queue.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            requests: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Create a provider that fails every completion with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            failure: Some(message.into()),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// All requests received so far, in order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginAdapter for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BriefpilotError> {
        self.requests.lock().await.push(request);

        if let Some(message) = &self.failure {
            return Err(BriefpilotError::provider(message.clone()));
        }

        let text = self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "scripted response".to_string());

        Ok(CompletionResponse {
            text,
            usage: Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            }),
        })
    }
}
