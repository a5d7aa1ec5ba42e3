// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for crewline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level crewline configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CrewlineConfig {
    /// Process-level settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Who the local user is.
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Where the initial entity snapshot comes from.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Generated message identifier settings.
    #[serde(default)]
    pub ids: IdsConfig,

    /// Scripted client reply after a self-sent message.
    #[serde(default)]
    pub auto_reply: AutoReplyConfig,

    /// Client inbox settings.
    #[serde(default)]
    pub inbox: InboxConfig,
}

/// Process-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
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

/// Identity of the local user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaConfig {
    /// Identifier the local user sends as. Self-sent messages never count
    /// as unread, and broadcasts go out under this sender.
    #[serde(default = "default_self_id")]
    pub self_id: String,

    /// Client whose platform support thread shows in the client inbox.
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            self_id: default_self_id(),
            client_id: default_client_id(),
        }
    }
}

fn default_self_id() -> String {
    "me".to_string()
}

fn default_client_id() -> String {
    "steve".to_string()
}

/// Seed snapshot source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Path to a JSON seed. `None` uses the built-in demo fixture.
    #[serde(default)]
    pub path: Option<String>,
}

/// Generated message identifier settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdsConfig {
    /// Prefix of generated message ids. Identifier order is the recency
    /// order, so the prefix should sort after every seeded id.
    #[serde(default = "default_id_prefix")]
    pub prefix: String,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            prefix: default_id_prefix(),
        }
    }
}

fn default_id_prefix() -> String {
    "new".to_string()
}

/// Scripted auto-reply configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AutoReplyConfig {
    /// Whether a self-sent message schedules a reply from the thread's client.
    #[serde(default = "default_auto_reply_enabled")]
    pub enabled: bool,

    /// Delay before the reply lands, in milliseconds.
    #[serde(default = "default_auto_reply_delay_ms")]
    pub delay_ms: u64,

    /// Reply text.
    #[serde(default = "default_auto_reply_content")]
    pub content: String,
}

impl Default for AutoReplyConfig {
    fn default() -> Self {
        Self {
            enabled: default_auto_reply_enabled(),
            delay_ms: default_auto_reply_delay_ms(),
            content: default_auto_reply_content(),
        }
    }
}

fn default_auto_reply_enabled() -> bool {
    true
}

fn default_auto_reply_delay_ms() -> u64 {
    2000
}

fn default_auto_reply_content() -> String {
    "Thanks for the update!".to_string()
}

/// Client inbox configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InboxConfig {
    /// Booking that hosts platform support threads rather than project work.
    #[serde(default = "default_system_booking_id")]
    pub system_booking_id: String,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            system_booking_id: default_system_booking_id(),
        }
    }
}

fn default_system_booking_id() -> String {
    "booking-system".to_string()
}
