// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for crewline.
//!
//! Lookups by unknown identifier and no-op writes are not errors: they come
//! back as `None` or empty collections. Only input the store must never see
//! and failures loading the seed surface here. Configuration problems are
//! reported separately, as diagnostics from `crewline-config`.

use thiserror::Error;

/// The primary error type used across crewline crates.
#[derive(Debug, Error)]
pub enum CrewlineError {
    /// The seed snapshot could not be read or parsed.
    #[error("seed error: {message}")]
    Seed {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A write was refused before touching the store.
    #[error("input rejected: {reason}")]
    InputRejected { reason: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CrewlineError {
    /// Shorthand for [`CrewlineError::InputRejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::InputRejected {
            reason: reason.into(),
        }
    }
}
