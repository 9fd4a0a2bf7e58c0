// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./briefpilot.toml` > `~/.config/briefpilot/briefpilot.toml`
//! > `/etc/briefpilot/briefpilot.toml` with environment variable overrides via
//! the `BRIEFPILOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BriefpilotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/briefpilot/briefpilot.toml` (system-wide)
/// 3. `~/.config/briefpilot/briefpilot.toml` (user XDG config)
/// 4. `./briefpilot.toml` (local directory)
/// 5. `BRIEFPILOT_*` environment variables
pub fn load_config() -> Result<BriefpilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BriefpilotConfig::default()))
        .merge(Toml::file("/etc/briefpilot/briefpilot.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("briefpilot/briefpilot.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("briefpilot.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<BriefpilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BriefpilotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BriefpilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BriefpilotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `BRIEFPILOT_ASANA_ACCESS_TOKEN`
/// must map to `asana.access_token`, not `asana.access.token`.
fn env_provider() -> Env {
    Env::prefixed("BRIEFPILOT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: BRIEFPILOT_ASANA_ACCESS_TOKEN -> "asana_access_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("asana_", "asana.", 1)
            .replacen("pipeline_", "pipeline.", 1);
        mapped.into()
    })
}
