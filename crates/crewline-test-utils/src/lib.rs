// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for crewline integration tests.
//!
//! # Components
//!
//! - [`SeedBuilder`] - Small hand-built seeds for focused scenarios
//! - [`ManualClock`] - Clock that only moves when the test moves it
//! - [`test_config`] - Defaults with auto-replies switched off

pub mod clock;
pub mod fixtures;

pub use clock::ManualClock;
pub use fixtures::{SeedBuilder, test_config};
