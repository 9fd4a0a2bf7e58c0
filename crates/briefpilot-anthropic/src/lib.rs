// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for Briefpilot.
//!
//! This crate implements [`CompletionProvider`] for the Anthropic Messages
//! API. Brief parsing and field mapping are single-shot prompts, so the
//! client is non-streaming.

pub mod client;
pub mod types;

use async_trait::async_trait;
use briefpilot_config::AnthropicConfig;
use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::{CompletionProvider, PluginAdapter};
use briefpilot_core::types::{AdapterType, CompletionRequest, CompletionResponse, TokenUsage};
use tracing::info;

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic Claude provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.api_key` if set
    /// 2. `ANTHROPIC_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &AnthropicConfig) -> Result<Self, BriefpilotError> {
        let api_key = resolve_api_key(&config.api_key)?;

        let client = AnthropicClient::new(
            api_key,
            config.api_version.clone(),
            config.default_model.clone(),
        )?;

        info!(
            model = config.default_model,
            "Anthropic provider initialized"
        );

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Returns the configured default model identifier.
    pub fn default_model(&self) -> &str {
        self.client.default_model()
    }
}

impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BriefpilotError> {
        let api_request = to_message_request(&request);
        let response = self.client.complete_message(&api_request).await?;

        Ok(CompletionResponse {
            text: response.text(),
            usage: Some(TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            }),
        })
    }
}

/// Converts a [`CompletionRequest`] to an Anthropic [`MessageRequest`].
fn to_message_request(request: &CompletionRequest) -> MessageRequest {
    MessageRequest {
        model: request.model.clone(),
        messages: vec![ApiMessage::user(request.prompt.clone())],
        system: None,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        stream: false,
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, BriefpilotError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        BriefpilotError::Config(
            "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
        )
    })
}
