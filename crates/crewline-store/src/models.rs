// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity types held by the store.

use chrono::{DateTime, Utc};
use crewline_core::{
    ActionStatus, ActionType, ActivityId, ActivitySeverity, BookingId, MessageId, MessageType,
    Role, ShiftId, ShiftStatus, ThreadId, UserId,
};
use serde::{Deserialize, Serialize};

/// A person on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// One scheduled work assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub title: String,
    /// Display date, e.g. `Mon Oct 24`.
    pub date: String,
    /// Display time window, e.g. `07:00 AM - 03:00 PM`.
    pub time: String,
    pub location: String,
    pub status: ShiftStatus,
    pub booking_id: BookingId,
    /// Worker on the shift. Usually absent for `Open` shifts, but the two
    /// fields are set independently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
}

/// A client's work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub title: String,
    pub client_id: UserId,
    pub staff_count: u32,
    /// Shifts in booking order.
    #[serde(default)]
    pub shifts: Vec<ShiftId>,
}

/// The conversation between a booking's client and one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub booking_id: BookingId,
    pub client_id: UserId,
    pub staff_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<MessageId>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub is_archived: bool,
}

/// Structured task attached to an action message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Shift the action is about, for chat context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<ShiftId>,
}

impl ActionData {
    pub fn is_pending(&self) -> bool {
        self.status == ActionStatus::Pending
    }

    /// Moves `Pending` to `Resolved`. Returns whether anything changed;
    /// a resolved action stays resolved.
    pub fn resolve(&mut self) -> bool {
        if self.is_pending() {
            self.status = ActionStatus::Resolved;
            true
        } else {
            false
        }
    }
}

/// One entry in a thread. Messages are appended, never edited, apart from
/// resolving their action payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub thread_id: ThreadId,
    /// A user id or the `"system"` sentinel.
    pub sender_id: UserId,
    pub content: String,
    /// Display timestamp (`Yesterday`, `09:20 AM`, `Just now`).
    pub timestamp: String,
    /// Instant the message was created, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionData>,
}

impl Message {
    /// The action type if this is an action message still waiting on someone.
    pub fn pending_action(&self) -> Option<ActionType> {
        if self.message_type != MessageType::Action {
            return None;
        }
        self.action
            .as_ref()
            .filter(|action| action.is_pending())
            .map(|action| action.action_type)
    }

    /// When the message was sent: `sent_at`, else the display timestamp if it
    /// happens to be RFC 3339.
    pub fn sent_instant(&self) -> Option<DateTime<Utc>> {
        self.sent_at.or_else(|| {
            DateTime::parse_from_rfc3339(&self.timestamp)
                .ok()
                .map(|t| t.with_timezone(&Utc))
        })
    }
}

/// Read-only audit entry on a booking's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: ActivityId,
    pub booking_id: BookingId,
    #[serde(rename = "type")]
    pub severity: ActivitySeverity,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn action_message(status: ActionStatus, message_type: MessageType) -> Message {
        Message {
            id: MessageId::from("msg-1"),
            thread_id: ThreadId::from("t-1"),
            sender_id: UserId::from("ben"),
            content: "Timesheet submitted.".into(),
            timestamp: "10:30 AM".into(),
            sent_at: None,
            message_type,
            is_read: false,
            action: Some(ActionData {
                action_type: ActionType::Timesheet,
                title: "Timesheet Submitted".into(),
                details: None,
                status,
                metadata: None,
                shift_id: None,
            }),
        }
    }

    #[test]
    fn pending_action_requires_action_type_and_pending_status() {
        let pending = action_message(ActionStatus::Pending, MessageType::Action);
        assert_eq!(pending.pending_action(), Some(ActionType::Timesheet));

        let resolved = action_message(ActionStatus::Resolved, MessageType::Action);
        assert_eq!(resolved.pending_action(), None);

        // A payload on a plain text message does not count.
        let text = action_message(ActionStatus::Pending, MessageType::Text);
        assert_eq!(text.pending_action(), None);
    }

    #[test]
    fn resolve_is_one_way() {
        let mut action = action_message(ActionStatus::Pending, MessageType::Action)
            .action
            .unwrap();
        assert!(action.resolve());
        assert_eq!(action.status, ActionStatus::Resolved);
        assert!(!action.resolve());
        assert_eq!(action.status, ActionStatus::Resolved);
    }

    #[test]
    fn sent_instant_prefers_sent_at_then_parses_timestamp() {
        let mut msg = action_message(ActionStatus::Pending, MessageType::Action);
        assert_eq!(msg.sent_instant(), None);

        msg.timestamp = "2026-10-18T09:00:00Z".into();
        let parsed = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        assert_eq!(msg.sent_instant(), Some(parsed));

        let stamped = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        msg.sent_at = Some(stamped);
        assert_eq!(msg.sent_instant(), Some(stamped));
    }

    #[test]
    fn message_json_uses_type_field() {
        let msg = action_message(ActionStatus::Pending, MessageType::Action);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "ACTION");
        assert_eq!(json["action"]["type"], "TIMESHEET");
        assert_eq!(json["action"]["status"], "PENDING");
        assert!(json.get("sent_at").is_none());
    }
}
