// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seed fixtures for focused tests.
//!
//! The demo seed covers the happy path; `SeedBuilder` assembles the odd
//! shapes (empty bookings, archived threads, dangling pointers) in a few
//! lines.

use crewline_config::CrewlineConfig;
use crewline_core::{
    ActionStatus, ActionType, ActivitySeverity, MessageType, Role, ShiftStatus, UserId,
};
use crewline_store::{
    ActionData, ActivityItem, Booking, EntityStore, Message, Seed, Shift, Thread, User,
};

/// Default configuration with the auto-reply switched off, so mutation tests
/// only see the writes they make.
pub fn test_config() -> CrewlineConfig {
    let mut config = CrewlineConfig::default();
    config.auto_reply.enabled = false;
    config
}

/// Builder for hand-made seeds.
///
/// Messages added through the builder become their thread's last message,
/// the way a live conversation would leave it.
#[derive(Debug, Default)]
pub struct SeedBuilder {
    seed: Seed,
}

impl SeedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user.
    pub fn user(mut self, id: &str, role: Role) -> Self {
        self.seed.users.push(User {
            id: id.into(),
            name: capitalize(id),
            role,
            avatar_url: String::new(),
            company: None,
        });
        self
    }

    /// Add a booking with no shifts.
    pub fn booking(mut self, id: &str, client: &str) -> Self {
        self.seed.bookings.push(Booking {
            id: id.into(),
            title: format!("Booking {id}"),
            client_id: client.into(),
            staff_count: 0,
            shifts: Vec::new(),
        });
        self
    }

    /// Add a shift and list it on its booking, if the booking exists.
    pub fn shift(
        mut self,
        id: &str,
        booking: &str,
        status: ShiftStatus,
        assigned_to: Option<&str>,
    ) -> Self {
        self.seed.shifts.push(Shift {
            id: id.into(),
            title: "General Labourer".into(),
            date: "Mon Oct 24".into(),
            time: "07:00 AM - 03:00 PM".into(),
            location: "12 George St".into(),
            status,
            booking_id: booking.into(),
            assigned_to: assigned_to.map(UserId::from),
        });
        if let Some(b) = self.seed.bookings.iter_mut().find(|b| b.id == booking) {
            b.shifts.push(id.into());
            if assigned_to.is_some() {
                b.staff_count += 1;
            }
        }
        self
    }

    /// Add a thread with no messages.
    pub fn thread(mut self, id: &str, booking: &str, client: &str, staff: &str) -> Self {
        self.seed.threads.push(Thread {
            id: id.into(),
            booking_id: booking.into(),
            client_id: client.into(),
            staff_id: staff.into(),
            last_message_id: None,
            unread_count: 0,
            is_archived: false,
        });
        self
    }

    /// Append a read text message and point its thread at it.
    pub fn message(self, id: &str, thread: &str, sender: &str, content: &str) -> Self {
        self.push_message(Message {
            id: id.into(),
            thread_id: thread.into(),
            sender_id: sender.into(),
            content: content.into(),
            timestamp: "09:00 AM".into(),
            sent_at: None,
            message_type: MessageType::Text,
            is_read: true,
            action: None,
        })
    }

    /// Append an unread action message with a pending payload.
    pub fn action(self, id: &str, thread: &str, sender: &str, action_type: ActionType) -> Self {
        self.push_message(Message {
            id: id.into(),
            thread_id: thread.into(),
            sender_id: sender.into(),
            content: format!("{action_type} filed."),
            timestamp: "09:00 AM".into(),
            sent_at: None,
            message_type: MessageType::Action,
            is_read: false,
            action: Some(ActionData {
                action_type,
                title: action_type.to_string(),
                details: None,
                status: ActionStatus::Pending,
                metadata: None,
                shift_id: None,
            }),
        })
    }

    /// Append a fully specified message and point its thread at it.
    pub fn push_message(mut self, message: Message) -> Self {
        if let Some(t) = self
            .seed
            .threads
            .iter_mut()
            .find(|t| t.id == message.thread_id)
        {
            t.last_message_id = Some(message.id.clone());
        }
        self.seed.messages.push(message);
        self
    }

    /// Set a thread's unread counter.
    pub fn unread(mut self, thread: &str, count: u32) -> Self {
        if let Some(t) = self.seed.threads.iter_mut().find(|t| t.id == thread) {
            t.unread_count = count;
        }
        self
    }

    pub fn archived(mut self, thread: &str) -> Self {
        if let Some(t) = self.seed.threads.iter_mut().find(|t| t.id == thread) {
            t.is_archived = true;
        }
        self
    }

    /// Point a thread at a message id that may not exist.
    pub fn last_message(mut self, thread: &str, message: &str) -> Self {
        if let Some(t) = self.seed.threads.iter_mut().find(|t| t.id == thread) {
            t.last_message_id = Some(message.into());
        }
        self
    }

    pub fn activity(mut self, id: &str, booking: &str, title: &str) -> Self {
        self.seed.activities.push(ActivityItem {
            id: id.into(),
            booking_id: booking.into(),
            severity: ActivitySeverity::Info,
            title: title.into(),
            description: None,
            timestamp: "Oct 20 • 09:00 AM".into(),
            icon: None,
        });
        self
    }

    pub fn build(self) -> Seed {
        self.seed
    }

    /// Build straight into a store with the default id prefix.
    pub fn store(self) -> EntityStore {
        EntityStore::from_seed(self.seed, "new")
    }
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_move_the_thread_pointer() {
        let seed = SeedBuilder::new()
            .booking("b1", "steve")
            .thread("t1", "b1", "steve", "me")
            .message("m1", "t1", "me", "hello")
            .action("m2", "t1", "steve", ActionType::Sick)
            .build();
        assert_eq!(seed.threads[0].last_message_id.as_ref().unwrap(), "m2");
        assert_eq!(seed.messages[1].pending_action(), Some(ActionType::Sick));
    }

    #[test]
    fn shifts_join_their_booking() {
        let seed = SeedBuilder::new()
            .booking("b1", "steve")
            .shift("s1", "b1", ShiftStatus::Active, Some("ben"))
            .shift("s2", "b1", ShiftStatus::Open, None)
            .build();
        assert_eq!(seed.bookings[0].shifts.len(), 2);
        assert_eq!(seed.bookings[0].staff_count, 1);
        assert!(seed.lint().is_empty());
    }

    #[test]
    fn test_config_silences_auto_reply() {
        assert!(!test_config().auto_reply.enabled);
    }
}
