// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read models derived from the entity store.
//!
//! Every function here is a pure fold over a borrowed store and recomputes
//! from scratch. None of them fail: a dangling reference yields `None` or
//! an empty collection.

use chrono::Duration;
use crewline_core::{ActionType, MessageType, ShiftStatus, UserId};
use crewline_store::{ActivityItem, Booking, EntityStore, Message, Shift, Thread, User};

/// Two broadcast copies closer together than this are one broadcast.
pub const BROADCAST_DEDUP_WINDOW_MS: i64 = 1_000;

/// A thread joined with the rows an inbox row shows.
#[derive(Debug, Clone, Copy)]
pub struct ThreadPreview<'a> {
    pub thread: &'a Thread,
    pub booking: Option<&'a Booking>,
    pub client: Option<&'a User>,
    pub staff: Option<&'a User>,
    /// `None` when the thread has no messages yet or its pointer dangles.
    pub last_message: Option<&'a Message>,
}

pub fn thread_preview<'a>(store: &'a EntityStore, thread: &'a Thread) -> ThreadPreview<'a> {
    ThreadPreview {
        thread,
        booking: store.booking(thread.booking_id.as_str()),
        client: store.user(thread.client_id.as_str()),
        staff: store.user(thread.staff_id.as_str()),
        last_message: store.last_message(thread),
    }
}

/// Rollup of every thread under one booking.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingSummary<'a> {
    pub total_unread: u32,
    /// Latest by message id, which tracks arrival order.
    pub latest_message: Option<&'a Message>,
    pub active_shift_count: usize,
    pub has_pending_action: bool,
    pub is_urgent_action: bool,
}

pub fn analyze_booking<'a>(store: &'a EntityStore, booking: &'a Booking) -> BookingSummary<'a> {
    let mut summary = BookingSummary::default();

    for thread in store.threads_for_booking(booking.id.as_str()) {
        summary.total_unread = summary.total_unread.saturating_add(thread.unread_count);

        let Some(last) = store.last_message(thread) else {
            continue;
        };
        if summary.latest_message.is_none_or(|latest| last.id > latest.id) {
            summary.latest_message = Some(last);
        }
        if let Some(action) = last.pending_action() {
            summary.has_pending_action = true;
            summary.is_urgent_action |= action.is_urgent();
        }
    }

    summary.active_shift_count = store
        .booking_shifts(booking)
        .filter(|s| s.status == ShiftStatus::Active)
        .count();

    summary
}

/// One worker's slice of a booking.
#[derive(Debug, Clone)]
pub struct WorkerEntry<'a> {
    pub worker_id: &'a UserId,
    pub user: Option<&'a User>,
    /// The worker's shifts in booking order.
    pub shifts: Vec<&'a Shift>,
    pub thread: Option<&'a Thread>,
    pub last_message: Option<&'a Message>,
    /// Pending action on the thread's last message.
    pub action_type: Option<ActionType>,
}

impl WorkerEntry<'_> {
    pub fn has_action(&self) -> bool {
        self.action_type.is_some()
    }

    pub fn unread_count(&self) -> u32 {
        self.thread.map_or(0, |t| t.unread_count)
    }

    /// Sort key: pending action, then unread, then the rest.
    fn rank(&self) -> u8 {
        if self.has_action() {
            0
        } else if self.unread_count() > 0 {
            1
        } else {
            2
        }
    }
}

/// Workers on a booking in attention order, plus the shifts nobody holds.
#[derive(Debug, Clone)]
pub struct WorkerRoster<'a> {
    pub workers: Vec<WorkerEntry<'a>>,
    pub unassigned: Vec<&'a Shift>,
    /// Shift ids listed on the booking, resolvable or not.
    pub total_shifts: usize,
}

impl WorkerRoster<'_> {
    pub fn unfilled_count(&self) -> usize {
        self.unassigned.len()
    }

    pub fn filled_count(&self) -> usize {
        self.total_shifts.saturating_sub(self.unassigned.len())
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.unassigned.is_empty()
    }
}

pub fn group_workers_by_booking<'a>(
    store: &'a EntityStore,
    booking: &'a Booking,
) -> WorkerRoster<'a> {
    let mut workers: Vec<WorkerEntry<'a>> = Vec::new();
    let mut unassigned = Vec::new();

    for shift in store.booking_shifts(booking) {
        let Some(worker_id) = shift.assigned_to.as_ref() else {
            unassigned.push(shift);
            continue;
        };

        if let Some(entry) = workers.iter_mut().find(|w| w.worker_id == worker_id) {
            entry.shifts.push(shift);
            continue;
        }

        let thread = store
            .threads_for_booking(booking.id.as_str())
            .find(|t| &t.staff_id == worker_id);
        let last_message = thread.and_then(|t| store.last_message(t));
        workers.push(WorkerEntry {
            worker_id,
            user: store.user(worker_id.as_str()),
            shifts: vec![shift],
            thread,
            last_message,
            action_type: last_message.and_then(Message::pending_action),
        });
    }

    workers.sort_by_key(WorkerEntry::rank);

    WorkerRoster {
        workers,
        unassigned,
        total_shifts: booking.shifts.len(),
    }
}

/// Whether two broadcast copies are the same logical broadcast.
fn same_broadcast(a: &Message, b: &Message) -> bool {
    if a.content != b.content {
        return false;
    }
    match (a.sent_instant(), b.sent_instant()) {
        (Some(x), Some(y)) => (x - y).abs() < Duration::milliseconds(BROADCAST_DEDUP_WINDOW_MS),
        _ => false,
    }
}

/// The booking's broadcast log: one entry per broadcast, in log order.
pub fn collect_broadcasts<'a>(store: &'a EntityStore, booking_id: &str) -> Vec<&'a Message> {
    let mut log: Vec<&Message> = Vec::new();

    for message in store.messages() {
        if message.message_type != MessageType::Broadcast {
            continue;
        }
        let in_booking = store
            .thread(message.thread_id.as_str())
            .is_some_and(|t| t.booking_id == booking_id);
        if !in_booking {
            continue;
        }
        if !log.iter().any(|seen| same_broadcast(seen, message)) {
            log.push(message);
        }
    }

    log
}

/// The booking's activity feed, newest first.
pub fn collect_activity<'a>(store: &'a EntityStore, booking_id: &str) -> Vec<&'a ActivityItem> {
    let mut feed: Vec<_> = store
        .activities()
        .filter(|a| a.booking_id == booking_id)
        .collect();
    feed.reverse();
    feed
}

/// The booking's shifts held by the thread's staff member, in booking order.
pub fn thread_context_shifts<'a>(store: &'a EntityStore, thread: &'a Thread) -> Vec<&'a Shift> {
    let Some(booking) = store.booking(thread.booking_id.as_str()) else {
        return Vec::new();
    };
    store
        .booking_shifts(booking)
        .filter(|s| s.assigned_to.as_ref() == Some(&thread.staff_id))
        .collect()
}

/// Threads where `staff_id` is the staff participant.
pub fn staff_threads<'a>(store: &'a EntityStore, staff_id: &str) -> Vec<&'a Thread> {
    store.threads().filter(|t| t.staff_id == staff_id).collect()
}

/// A thread in someone's relationship history with its context shifts.
#[derive(Debug, Clone)]
pub struct RelationshipEntry<'a> {
    pub thread: &'a Thread,
    pub shifts: Vec<&'a Shift>,
}

/// Everything one user has worked on with the rest of the platform.
#[derive(Debug, Clone)]
pub struct Relationship<'a> {
    pub user: Option<&'a User>,
    /// Threads with shifts still running or coming up.
    pub active: Vec<RelationshipEntry<'a>>,
    pub past: Vec<RelationshipEntry<'a>>,
}

pub fn relationship<'a>(store: &'a EntityStore, user_id: &str) -> Relationship<'a> {
    let mut active = Vec::new();
    let mut past = Vec::new();

    for thread in store
        .threads()
        .filter(|t| t.client_id == user_id || t.staff_id == user_id)
    {
        let shifts = thread_context_shifts(store, thread);
        let live = shifts
            .iter()
            .any(|s| matches!(s.status, ShiftStatus::Active | ShiftStatus::Upcoming));
        let entry = RelationshipEntry { thread, shifts };
        if live {
            active.push(entry);
        } else {
            past.push(entry);
        }
    }

    Relationship {
        user: store.user(user_id),
        active,
        past,
    }
}
