// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./crewline.toml` > `~/.config/crewline/crewline.toml` >
//! `/etc/crewline/crewline.toml` with environment variable overrides via `CREWLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CrewlineConfig;

/// Top-level sections, used to map `CREWLINE_<SECTION>_<KEY>` onto `section.key`.
const SECTIONS: &[&str] = &["app", "persona", "seed", "ids", "auto_reply", "inbox"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/crewline/crewline.toml` (system-wide)
/// 3. `~/.config/crewline/crewline.toml` (user XDG config)
/// 4. `./crewline.toml` (local directory)
/// 5. `CREWLINE_*` environment variables
pub fn load_config() -> Result<CrewlineConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CrewlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrewlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CrewlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CrewlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CrewlineConfig::default()))
        .merge(Toml::file("/etc/crewline/crewline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("crewline/crewline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("crewline.toml"))
        .merge(env_provider())
}

/// Env provider mapping `CREWLINE_AUTO_REPLY_DELAY_MS` to `auto_reply.delay_ms`.
///
/// Section names contain underscores, so `Env::split("_")` would be ambiguous;
/// the known section prefixes are matched explicitly instead.
fn env_provider() -> Env {
    Env::prefixed("CREWLINE_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.into()
    })
}
