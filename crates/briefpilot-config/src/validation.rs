// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as recognized log levels and well-formed Asana gids.

use crate::diagnostic::ConfigError;
use crate::model::BriefpilotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BriefpilotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.app.log_level
            ),
        });
    }

    if config.anthropic.default_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "anthropic.default_model must not be empty".to_string(),
        });
    }

    if config.anthropic.api_version.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "anthropic.api_version must not be empty".to_string(),
        });
    }

    // Asana gids are numeric strings.
    check_gid(&mut errors, "asana.default_project", &config.asana.default_project);
    check_gid(&mut errors, "asana.default_section", &config.asana.default_section);
    check_gid(&mut errors, "asana.assignee", &config.asana.assignee);
    check_gid(
        &mut errors,
        "asana.rework_section",
        &Some(config.asana.rework_section.clone()),
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_gid(errors: &mut Vec<ConfigError>, key: &str, value: &Option<String>) {
    if let Some(gid) = value
        && (gid.is_empty() || !gid.chars().all(|c| c.is_ascii_digit()))
    {
        errors.push(ConfigError::Validation {
            message: format!("{key} must be a numeric Asana gid, got `{gid}`"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = BriefpilotConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = BriefpilotConfig::default();
        config.app.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn non_numeric_project_gid_fails_validation() {
        let mut config = BriefpilotConfig::default();
        config.asana.default_project = Some("my-project".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("default_project"))));
    }

    #[test]
    fn empty_model_fails_validation() {
        let mut config = BriefpilotConfig::default();
        config.anthropic.default_model = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("default_model"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = BriefpilotConfig::default();
        config.app.log_level = "debug".to_string();
        config.asana.default_project = Some("1206000000000001".to_string());
        config.asana.default_section = Some("1206000000000002".to_string());
        config.asana.assignee = Some("1206000000000003".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
