// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifier newtypes and domain enums shared by every crewline crate.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a user (staff, client, or platform admin).
    UserId
);
string_id!(
    /// Identifier of a shift.
    ShiftId
);
string_id!(
    /// Identifier of a booking (a client's work order).
    BookingId
);
string_id!(
    /// Identifier of a conversation thread.
    ThreadId
);
string_id!(
    /// Identifier of a message.
    ///
    /// Ordering is plain string comparison. Display timestamps are not
    /// sortable, so identifier order stands in for arrival order.
    MessageId
);
string_id!(
    /// Identifier of an activity log entry.
    ActivityId
);

/// Sender sentinel for platform-generated messages.
const SYSTEM_SENDER: &str = "system";

impl UserId {
    /// The `"system"` sender used for platform-generated messages.
    pub fn system() -> Self {
        Self(SYSTEM_SENDER.to_string())
    }

    /// Whether this is the `"system"` sender sentinel.
    pub fn is_system(&self) -> bool {
        self.0 == SYSTEM_SENDER
    }
}

/// Role of a user on the platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Staff,
    Client,
    Admin,
}

/// Lifecycle status of a shift.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Active,
    Completed,
    Upcoming,
    Cancelled,
    Open,
}

/// Kind of a message in a thread.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Text,
    System,
    Broadcast,
    /// Carries an [`ActionType`] payload that someone has to resolve.
    Action,
}

/// Kind of task carried by an action message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Sick,
    Timesheet,
    Cancellation,
    Payment,
    Document,
}

impl ActionType {
    /// Sick reports and cancellations leave a shift uncovered; everything
    /// else can wait.
    pub fn is_urgent(self) -> bool {
        matches!(self, ActionType::Sick | ActionType::Cancellation)
    }
}

/// Resolution state of an action. `Resolved` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Pending,
    Resolved,
}

/// Severity category of an activity log entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivitySeverity {
    Info,
    Success,
    Warning,
    Error,
}
