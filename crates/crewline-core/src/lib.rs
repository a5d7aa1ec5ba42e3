// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for crewline.
//!
//! Provides the identifier newtypes, domain enums, clock seam, and error
//! type shared by the store, the inbox engines, and the binary.

pub mod clock;
pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use clock::{Clock, SystemClock};
pub use error::CrewlineError;
pub use types::{
    ActionStatus, ActionType, ActivityId, ActivitySeverity, BookingId, MessageId, MessageType,
    Role, ShiftId, ShiftStatus, ThreadId, UserId,
};
