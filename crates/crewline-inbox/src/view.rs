// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Navigation state: which screen is showing and what it is about.

use std::fmt;

use crewline_core::{BookingId, ThreadId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the marketplace the local user is acting for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Persona {
    #[default]
    Staff,
    Client,
}

/// One variant per screen, each carrying the ids that screen needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    StaffInbox,
    StaffChat { thread_id: ThreadId },
    ClientInbox,
    ClientBookingDetail { booking_id: BookingId },
}

impl View {
    /// The inbox a persona lands on.
    pub fn home(persona: Persona) -> Self {
        match persona {
            Persona::Staff => Self::StaffInbox,
            Persona::Client => Self::ClientInbox,
        }
    }

    pub fn persona(&self) -> Persona {
        match self {
            Self::StaffInbox | Self::StaffChat { .. } => Persona::Staff,
            Self::ClientInbox | Self::ClientBookingDetail { .. } => Persona::Client,
        }
    }

    /// Where "back" leads: detail screens return to their inbox.
    pub fn back(&self) -> Self {
        Self::home(self.persona())
    }

    /// The open chat, if any. Only a chat accepts sends.
    pub fn chat_thread(&self) -> Option<&ThreadId> {
        match self {
            Self::StaffChat { thread_id } => Some(thread_id),
            _ => None,
        }
    }

    /// The open booking, if any. Only a booking detail accepts broadcasts.
    pub fn detail_booking(&self) -> Option<&BookingId> {
        match self {
            Self::ClientBookingDetail { booking_id } => Some(booking_id),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaffInbox => f.write_str("staff inbox"),
            Self::StaffChat { thread_id } => write!(f, "chat {thread_id}"),
            Self::ClientInbox => f.write_str("client inbox"),
            Self::ClientBookingDetail { booking_id } => write!(f, "booking {booking_id}"),
        }
    }
}
