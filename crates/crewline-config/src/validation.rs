// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::CrewlineConfig;

/// Longest auto-reply delay accepted, in milliseconds.
pub const MAX_AUTO_REPLY_DELAY_MS: u64 = 60_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &CrewlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        fail(format!(
            "app.log_level `{}` must be one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.persona.self_id.trim().is_empty() {
        fail("persona.self_id must not be empty".to_string());
    }

    if config.persona.client_id.trim().is_empty() {
        fail("persona.client_id must not be empty".to_string());
    }

    let prefix = &config.ids.prefix;
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        fail(format!(
            "ids.prefix `{prefix}` must be non-empty and ASCII alphanumeric"
        ));
    }

    if config.auto_reply.enabled && config.auto_reply.content.trim().is_empty() {
        fail("auto_reply.content must not be empty while auto_reply is enabled".to_string());
    }

    if config.auto_reply.delay_ms > MAX_AUTO_REPLY_DELAY_MS {
        fail(format!(
            "auto_reply.delay_ms must be at most {MAX_AUTO_REPLY_DELAY_MS}, got {}",
            config.auto_reply.delay_ms
        ));
    }

    if config.inbox.system_booking_id.trim().is_empty() {
        fail("inbox.system_booking_id must not be empty".to_string());
    }

    if config.seed.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
        fail("seed.path must not be empty when set".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
