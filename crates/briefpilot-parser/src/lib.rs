// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured brief parsing for the Briefpilot pipeline.
//!
//! [`BriefParser`] turns free-form brief text into a validated
//! [`ParsedCampaign`] via a single AI completion, with a recovery path for
//! malformed output: the pipeline degrades to "fewer tasks recovered"
//! rather than failing hard on one bad completion.

pub mod prompt;
pub mod recovery;
pub mod validate;

use std::sync::Arc;

use tracing::{info, warn};

use briefpilot_core::error::BriefpilotError;
use briefpilot_core::traits::CompletionProvider;
use briefpilot_core::types::{CompletionRequest, ParsedCampaign};

/// Output-token ceiling for extraction. Briefs can enumerate 20+ tasks, so
/// this stays generous to avoid truncating the task list.
pub const PARSE_MAX_TOKENS: u32 = 16_000;

/// Near-deterministic sampling for consistent extraction.
const PARSE_TEMPERATURE: f32 = 0.1;

/// Parses campaign briefs into structured task data.
pub struct BriefParser {
    provider: Arc<dyn CompletionProvider>,
    default_model: String,
}

impl BriefParser {
    /// Creates a parser over the given completion backend.
    pub fn new(provider: Arc<dyn CompletionProvider>, default_model: impl Into<String>) -> Self {
        Self {
            provider,
            default_model: default_model.into(),
        }
    }

    /// Parse raw brief text into a validated campaign.
    ///
    /// Fails with [`BriefpilotError::Extraction`] when the text is empty or
    /// the AI backend is unreachable. Malformed AI output is handled by the
    /// recovery path and never fails this call.
    pub async fn parse(
        &self,
        raw_text: &str,
        instructions: Option<&str>,
        model: Option<&str>,
    ) -> Result<ParsedCampaign, BriefpilotError> {
        if raw_text.trim().is_empty() {
            return Err(BriefpilotError::Extraction(
                "brief document is empty or contains no text content".to_string(),
            ));
        }

        let model = model.unwrap_or(&self.default_model).to_string();
        info!(model, chars = raw_text.len(), "parsing brief content");

        let request = CompletionRequest {
            model,
            prompt: prompt::build_parsing_prompt(raw_text, instructions),
            max_tokens: PARSE_MAX_TOKENS,
            temperature: PARSE_TEMPERATURE,
        };

        let response = self.provider.complete(request).await.map_err(|e| {
            BriefpilotError::Extraction(format!("AI backend unreachable: {e}"))
        })?;

        let payload = recovery::extract_campaign_payload(&response.text);
        if recovery::was_recovered(&payload) {
            warn!("campaign payload came from the malformed-output recovery path");
        }

        let campaign = validate::validate_campaign(&payload);
        info!(
            campaign = campaign.name,
            tasks = campaign.tasks.len(),
            "parsed brief"
        );
        Ok(campaign)
    }
}
