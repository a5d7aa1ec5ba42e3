// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory entity store for crewline.
//!
//! Holds users, shifts, bookings, threads, messages, and the activity feed,
//! seeded from the built-in demo fixture or a JSON snapshot. Collections keep
//! insertion order so every derived view is deterministic.

pub mod models;
pub mod seed;
pub mod store;
pub mod table;

pub use models::*;
pub use seed::{Seed, SeedLint};
pub use store::{EntityStore, IdSequence};
pub use table::{Keyed, Table};
