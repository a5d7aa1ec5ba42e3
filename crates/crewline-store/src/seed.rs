// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seed snapshots: the data the store starts from.
//!
//! A seed is either the built-in demo fixture or a JSON document of the same
//! shape. Seeds are trusted; [`Seed::lint`] reports suspicious rows without
//! rejecting anything.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crewline_core::{
    ActionStatus, ActionType, ActivitySeverity, CrewlineError, MessageType, Role, ShiftStatus,
};
use serde::{Deserialize, Serialize};

use crate::models::{ActionData, ActivityItem, Booking, Message, Shift, Thread, User};

/// Every collection the store is built from, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub activities: Vec<ActivityItem>,
}

/// Something in a seed that breaks an invariant the engines assume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedLint {
    /// An `OPEN` shift that nonetheless names a worker.
    OpenShiftAssigned { shift: String, worker: String },
    /// A thread whose booking does not exist.
    ThreadWithoutBooking { thread: String, booking: String },
    /// A message whose thread does not exist.
    MessageWithoutThread { message: String, thread: String },
    /// A second thread for the same (booking, staff) pair.
    DuplicateThreadPair {
        booking: String,
        staff: String,
        thread: String,
    },
}

impl fmt::Display for SeedLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedLint::OpenShiftAssigned { shift, worker } => {
                write!(f, "shift {shift} is OPEN but assigned to {worker}")
            }
            SeedLint::ThreadWithoutBooking { thread, booking } => {
                write!(f, "thread {thread} references missing booking {booking}")
            }
            SeedLint::MessageWithoutThread { message, thread } => {
                write!(f, "message {message} references missing thread {thread}")
            }
            SeedLint::DuplicateThreadPair {
                booking,
                staff,
                thread,
            } => write!(
                f,
                "thread {thread} duplicates the ({booking}, {staff}) conversation"
            ),
        }
    }
}

impl Seed {
    /// Parse a JSON seed.
    pub fn from_json_str(json: &str) -> Result<Self, CrewlineError> {
        serde_json::from_str(json).map_err(|e| CrewlineError::Seed {
            message: format!("invalid seed JSON: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Read and parse a JSON seed file.
    pub fn from_path(path: &Path) -> Result<Self, CrewlineError> {
        let json = std::fs::read_to_string(path).map_err(|e| CrewlineError::Seed {
            message: format!("cannot read seed file {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, CrewlineError> {
        serde_json::to_string_pretty(self).map_err(|e| CrewlineError::Internal(e.to_string()))
    }

    /// Report rows that break invariants the engines rely on.
    pub fn lint(&self) -> Vec<SeedLint> {
        let mut findings = Vec::new();

        for shift in &self.shifts {
            if shift.status != ShiftStatus::Open {
                continue;
            }
            if let Some(worker) = &shift.assigned_to {
                findings.push(SeedLint::OpenShiftAssigned {
                    shift: shift.id.to_string(),
                    worker: worker.to_string(),
                });
            }
        }

        let bookings: HashSet<&str> = self.bookings.iter().map(|b| b.id.as_str()).collect();
        let mut pairs = HashSet::new();
        for thread in &self.threads {
            if !bookings.contains(thread.booking_id.as_str()) {
                findings.push(SeedLint::ThreadWithoutBooking {
                    thread: thread.id.to_string(),
                    booking: thread.booking_id.to_string(),
                });
            }
            if !pairs.insert((thread.booking_id.as_str(), thread.staff_id.as_str())) {
                findings.push(SeedLint::DuplicateThreadPair {
                    booking: thread.booking_id.to_string(),
                    staff: thread.staff_id.to_string(),
                    thread: thread.id.to_string(),
                });
            }
        }

        let threads: HashSet<&str> = self.threads.iter().map(|t| t.id.as_str()).collect();
        for message in &self.messages {
            if !threads.contains(message.thread_id.as_str()) {
                findings.push(SeedLint::MessageWithoutThread {
                    message: message.id.to_string(),
                    thread: message.thread_id.to_string(),
                });
            }
        }

        findings
    }

    /// The demo fixture: a construction booking with four workers over three
    /// days plus two open shifts, a one-shift event booking, and a platform
    /// support thread.
    pub fn demo() -> Self {
        Self {
            users: demo_users(),
            shifts: demo_shifts(),
            bookings: demo_bookings(),
            threads: demo_threads(),
            messages: demo_messages(),
            activities: demo_activities(),
        }
    }
}

fn avatar(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=200&h=200&fit=crop")
}

fn demo_users() -> Vec<User> {
    let user = |id: &str, name: &str, role: Role, photo: &str, company: Option<&str>| User {
        id: id.into(),
        name: name.into(),
        role,
        avatar_url: avatar(photo),
        company: company.map(str::to_string),
    };

    vec![
        user("me", "Alex Worker", Role::Staff, "photo-1599566150163-29194dcaad36", None),
        user(
            "steve",
            "Steve Miller",
            Role::Client,
            "photo-1535713875002-d1d0cf377fde",
            Some("Steve's Const"),
        ),
        user(
            "sarah",
            "Sarah Jenkins",
            Role::Client,
            "photo-1494790108377-be9c29b29330",
            Some("EventCo"),
        ),
        user("ben", "Ben Smith", Role::Staff, "photo-1507003211169-0a1dd7228f2d", None),
        user("charlie", "Charlie Kim", Role::Staff, "photo-1527980965255-d3b416303d12", None),
        user("david", "David Lee", Role::Staff, "photo-1633332755192-727a05c4013d", None),
        user("admin", "Connect Support", Role::Admin, "photo-1516321318423-f06f85e504b3", None),
    ]
}

const GEORGE_DAYS: [&str; 3] = ["Mon Oct 24", "Tue Oct 25", "Wed Oct 26"];
const GEORGE_CREW: [&str; 4] = ["me", "ben", "charlie", "david"];
const GEORGE_HOURS: &str = "07:00 AM - 03:00 PM";

/// `s<day>-<a..d>` for each worker and day, then the open days.
fn george_shift_ids() -> Vec<String> {
    let mut ids = Vec::new();
    for day in 1..=GEORGE_DAYS.len() {
        for letter in ['a', 'b', 'c', 'd'] {
            ids.push(format!("s{day}-{letter}"));
        }
    }
    ids.push("s-open-1".into());
    ids.push("s-open-2".into());
    ids
}

fn demo_shifts() -> Vec<Shift> {
    let labourer = |id: String, date: &str, status: ShiftStatus, worker: Option<&str>| Shift {
        id: id.into(),
        title: "General Labourer".into(),
        date: date.into(),
        time: GEORGE_HOURS.into(),
        location: "12 George St".into(),
        status,
        booking_id: "booking-george".into(),
        assigned_to: worker.map(Into::into),
    };

    let mut shifts = Vec::new();
    for (day_idx, day) in GEORGE_DAYS.into_iter().enumerate() {
        let status = match day_idx {
            0 => ShiftStatus::Completed,
            1 => ShiftStatus::Active,
            _ => ShiftStatus::Upcoming,
        };
        for (letter, worker) in ('a'..='d').zip(GEORGE_CREW) {
            let id = format!("s{}-{letter}", day_idx + 1);
            shifts.push(labourer(id, day, status, Some(worker)));
        }
    }
    shifts.push(labourer("s-open-1".into(), "Thu Oct 27", ShiftStatus::Open, None));
    shifts.push(labourer("s-open-2".into(), "Fri Oct 28", ShiftStatus::Open, None));

    shifts.push(Shift {
        id: "s-mascot-1".into(),
        title: "Senior Waitstaff".into(),
        date: "Fri Oct 28".into(),
        time: "05:00 PM".into(),
        location: "Mascot Terminal".into(),
        status: ShiftStatus::Upcoming,
        booking_id: "booking-mascot".into(),
        assigned_to: Some("me".into()),
    });
    shifts
}

fn demo_bookings() -> Vec<Booking> {
    vec![
        Booking {
            id: "booking-george".into(),
            title: "George St - Concreting Phase".into(),
            client_id: "steve".into(),
            staff_count: 5,
            shifts: george_shift_ids().into_iter().map(Into::into).collect(),
        },
        Booking {
            id: "booking-mascot".into(),
            title: "Mascot Event - Waitstaff".into(),
            client_id: "sarah".into(),
            staff_count: 1,
            shifts: vec!["s-mascot-1".into()],
        },
        Booking {
            id: "booking-system".into(),
            title: "System".into(),
            client_id: "steve".into(),
            staff_count: 0,
            shifts: Vec::new(),
        },
    ]
}

fn demo_threads() -> Vec<Thread> {
    let thread = |id: &str, booking: &str, client: &str, staff: &str, last: &str, unread| Thread {
        id: id.into(),
        booking_id: booking.into(),
        client_id: client.into(),
        staff_id: staff.into(),
        last_message_id: Some(last.into()),
        unread_count: unread,
        is_archived: false,
    };

    vec![
        thread("t-me-george", "booking-george", "steve", "me", "msg-g-2", 1),
        thread("t-ben-george", "booking-george", "steve", "ben", "msg-action-ben", 1),
        thread("t-charlie-george", "booking-george", "steve", "charlie", "msg-action-charlie", 1),
        thread("t-david-george", "booking-george", "steve", "david", "msg-sys-david", 0),
        thread("t-me-mascot", "booking-mascot", "sarah", "me", "msg-m-1", 0),
        thread("t-admin-steve", "booking-system", "steve", "admin", "msg-admin-pay", 1),
    ]
}

fn pending(action_type: ActionType, title: &str, details: &str, shift: Option<&str>) -> ActionData {
    ActionData {
        action_type,
        title: title.into(),
        details: Some(details.into()),
        status: ActionStatus::Pending,
        metadata: None,
        shift_id: shift.map(Into::into),
    }
}

fn demo_messages() -> Vec<Message> {
    let msg = |id: &str,
               thread: &str,
               sender: &str,
               content: &str,
               timestamp: &str,
               message_type: MessageType,
               is_read: bool| Message {
        id: id.into(),
        thread_id: thread.into(),
        sender_id: sender.into(),
        content: content.into(),
        timestamp: timestamp.into(),
        sent_at: None,
        message_type,
        is_read,
        action: None,
    };

    // Alex @ George St
    let g0 = msg(
        "msg-g-0",
        "t-me-george",
        "system",
        "You have been assigned 3 shifts for George St.",
        "2 days ago",
        MessageType::System,
        true,
    );
    let g1 = msg(
        "msg-g-1",
        "t-me-george",
        "me",
        "Hi Steve, confirm boots required?",
        "Yesterday",
        MessageType::Text,
        true,
    );
    let g2 = msg(
        "msg-g-2",
        "t-me-george",
        "steve",
        "Yes, steel cap boots are mandatory.",
        "09:20 AM",
        MessageType::Text,
        false,
    );

    // Ben @ George St
    let ben_sys = msg(
        "msg-sys-ben",
        "t-ben-george",
        "system",
        "Shift 1 Completed.",
        "Yesterday",
        MessageType::System,
        true,
    );
    let ben_action = Message {
        action: Some(pending(
            ActionType::Timesheet,
            "Timesheet Submitted",
            "8.0 Hours • Mon Oct 24",
            Some("s1-b"),
        )),
        ..msg(
            "msg-action-ben",
            "t-ben-george",
            "ben",
            "Timesheet submitted for approval.",
            "10:30 AM",
            MessageType::Action,
            false,
        )
    };

    // Charlie @ George St
    let charlie_late = msg(
        "msg-sys-charlie",
        "t-charlie-george",
        "charlie",
        "I might be 10 mins late tomorrow.",
        "Yesterday",
        MessageType::Text,
        true,
    );
    let charlie_action = Message {
        action: Some(pending(
            ActionType::Sick,
            "Sick Report",
            "Shift #2 (Tue Oct 25)",
            Some("s2-c"),
        )),
        ..msg(
            "msg-action-charlie",
            "t-charlie-george",
            "charlie",
            "Sick report filed.",
            "08:15 AM",
            MessageType::Action,
            false,
        )
    };

    // Alex @ Mascot
    let mascot = msg(
        "msg-m-1",
        "t-me-mascot",
        "sarah",
        "Menu has been updated, check attachment.",
        "Mon",
        MessageType::Text,
        true,
    );

    // Support @ Steve
    let invoice = Message {
        action: Some(pending(
            ActionType::Payment,
            "Invoice Due",
            "Invoice #4092 • $1,250.00",
            None,
        )),
        ..msg(
            "msg-admin-pay",
            "t-admin-steve",
            "admin",
            "Invoice #4092 is due.",
            "11:00 AM",
            MessageType::Action,
            false,
        )
    };

    vec![
        g0,
        g1,
        g2,
        ben_sys,
        ben_action,
        charlie_late,
        charlie_action,
        mascot,
        invoice,
    ]
}

fn demo_activities() -> Vec<ActivityItem> {
    let entry = |id: &str,
                 severity: ActivitySeverity,
                 title: &str,
                 description: &str,
                 timestamp: &str,
                 icon: &str| ActivityItem {
        id: id.into(),
        booking_id: "booking-george".into(),
        severity,
        title: title.into(),
        description: Some(description.into()),
        timestamp: timestamp.into(),
        icon: Some(icon.into()),
    };

    vec![
        entry(
            "act-1",
            ActivitySeverity::Info,
            "Booking Created",
            "Order received for 4x General Labourers.",
            "Oct 20 • 09:00 AM",
            "calendar",
        ),
        entry(
            "act-2",
            ActivitySeverity::Success,
            "Staff Assigned",
            "System automatically matched 4 workers to 12 shifts.",
            "Oct 21 • 02:30 PM",
            "users",
        ),
        entry(
            "act-3",
            ActivitySeverity::Info,
            "Shift Started",
            "All 4 workers checked in for Day 1.",
            "Oct 24 • 07:05 AM",
            "clock",
        ),
        entry(
            "act-4",
            ActivitySeverity::Warning,
            "Safety Broadcast Sent",
            "Message regarding PPE sent to all 4 staff.",
            "Oct 24 • 08:15 AM",
            "megaphone",
        ),
        entry(
            "act-5",
            ActivitySeverity::Error,
            "Sick Report Filed",
            "Charlie Kim reported sick for Shift #2.",
            "Oct 25 • 08:15 AM",
            "alert",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_is_lint_clean() {
        assert!(Seed::demo().lint().is_empty());
    }

    #[test]
    fn demo_george_booking_lists_all_shifts_in_order() {
        let seed = Seed::demo();
        let george = &seed.bookings[0];
        assert_eq!(george.shifts.len(), 14);
        assert_eq!(george.shifts[0], "s1-a");
        assert_eq!(george.shifts[11], "s3-d");
        assert_eq!(george.shifts[13], "s-open-2");

        let s2c = seed.shifts.iter().find(|s| s.id == "s2-c").unwrap();
        assert_eq!(s2c.assigned_to.as_ref().unwrap(), "charlie");
        assert_eq!(s2c.status, ShiftStatus::Active);
    }

    #[test]
    fn lint_flags_each_kind_of_problem() {
        let mut seed = Seed::demo();
        seed.shifts
            .iter_mut()
            .find(|s| s.id == "s-open-1")
            .unwrap()
            .assigned_to = Some("ben".into());
        let mut stray = seed.threads[1].clone();
        stray.id = "t-ben-george-2".into();
        seed.threads.push(stray);
        let mut orphan = seed.threads[0].clone();
        orphan.id = "t-orphan".into();
        orphan.booking_id = "booking-gone".into();
        seed.threads.push(orphan);
        let mut lost = seed.messages[0].clone();
        lost.id = "msg-lost".into();
        lost.thread_id = "t-gone".into();
        seed.messages.push(lost);

        let findings = seed.lint();
        assert_eq!(findings.len(), 4);
        assert!(findings.contains(&SeedLint::OpenShiftAssigned {
            shift: "s-open-1".into(),
            worker: "ben".into(),
        }));
        assert!(findings.iter().any(|f| matches!(
            f,
            SeedLint::DuplicateThreadPair { thread, .. } if thread == "t-ben-george-2"
        )));
        assert!(findings.iter().any(|f| matches!(
            f,
            SeedLint::ThreadWithoutBooking { booking, .. } if booking == "booking-gone"
        )));
        assert!(findings.iter().any(|f| matches!(
            f,
            SeedLint::MessageWithoutThread { message, .. } if message == "msg-lost"
        )));
    }

    #[test]
    fn json_seed_parses_minimal_document() {
        let json = r#"{
            "users": [{"id": "u1", "name": "Una", "role": "STAFF", "avatar_url": ""}],
            "threads": [{"id": "t1", "booking_id": "b1", "client_id": "c1", "staff_id": "u1"}]
        }"#;
        let seed = Seed::from_json_str(json).expect("valid seed");
        assert_eq!(seed.users.len(), 1);
        assert_eq!(seed.threads[0].unread_count, 0);
        assert!(seed.threads[0].last_message_id.is_none());
        assert!(seed.bookings.is_empty());
    }

    #[test]
    fn json_seed_rejects_garbage() {
        let err = Seed::from_json_str("{\"users\": 3}").unwrap_err();
        assert!(matches!(err, CrewlineError::Seed { .. }));
    }

    #[test]
    fn demo_seed_survives_json() {
        let seed = Seed::demo();
        let json = seed.to_json_pretty().unwrap();
        assert_eq!(Seed::from_json_str(&json).unwrap(), seed);
    }
}
