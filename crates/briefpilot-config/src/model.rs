// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Briefpilot pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Briefpilot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BriefpilotConfig {
    /// Application-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Asana tracker settings.
    #[serde(default)]
    pub asana: AsanaConfig,

    /// Brief processing settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Application-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` requires the `ANTHROPIC_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for brief parsing.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Model used for custom field mapping. Falls back to `default_model`.
    #[serde(default)]
    pub mapping_model: Option<String>,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl AnthropicConfig {
    /// The model to use for field mapping requests.
    pub fn mapping_model(&self) -> &str {
        self.mapping_model.as_deref().unwrap_or(&self.default_model)
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            mapping_model: None,
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Asana tracker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AsanaConfig {
    /// Asana personal access token. `None` requires `ASANA_ACCESS_TOKEN`.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Project gid that tasks are created in unless a request overrides it.
    #[serde(default)]
    pub default_project: Option<String>,

    /// Section gid that new tasks land in unless a request overrides it.
    #[serde(default)]
    pub default_section: Option<String>,

    /// Section gid for rework tasks (RESEND/UPCYCLE).
    #[serde(default = "default_rework_section")]
    pub rework_section: String,

    /// Assignee gid applied to every created task.
    #[serde(default)]
    pub assignee: Option<String>,
}

impl Default for AsanaConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            default_project: None,
            default_section: None,
            rework_section: default_rework_section(),
            assignee: None,
        }
    }
}

fn default_rework_section() -> String {
    "1206874104264011".to_string()
}

/// Brief processing configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Inline extraction instructions appended to the parsing prompt.
    /// Overridden by `instructions_file` if both are set.
    #[serde(default)]
    pub instructions: Option<String>,

    /// Path to a markdown file with extraction instructions.
    #[serde(default)]
    pub instructions_file: Option<String>,
}
