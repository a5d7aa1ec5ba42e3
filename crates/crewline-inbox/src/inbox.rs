// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The client inbox: project bookings plus the platform support thread.

use crewline_core::{Role, ThreadId};
use crewline_store::{Booking, EntityStore, Message, Thread};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::aggregate::{BookingSummary, analyze_booking};

/// Which part of the inbox to list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum InboxScope {
    #[default]
    All,
    /// Project bookings only.
    Projects,
    /// The platform support thread only.
    System,
}

/// Which rows within the scope to keep.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum InboxFilter {
    #[default]
    All,
    Unread,
    Action,
}

/// Inputs to [`client_inbox`].
#[derive(Debug, Clone, Copy)]
pub struct InboxOptions<'o> {
    pub scope: InboxScope,
    pub filter: InboxFilter,
    /// Client whose support thread is shown.
    pub client_id: &'o str,
    /// Booking that hosts support threads rather than project work.
    pub system_booking_id: &'o str,
}

/// Rollup of the support thread.
#[derive(Debug, Clone, Copy)]
pub struct SupportSummary<'a> {
    pub thread: &'a Thread,
    pub last_message: Option<&'a Message>,
    pub has_pending_action: bool,
    /// Support work is billing and paperwork, never a safety issue.
    pub is_urgent: bool,
    pub unread_count: u32,
}

impl SupportSummary<'_> {
    fn passes(&self, filter: InboxFilter) -> bool {
        match filter {
            InboxFilter::All => true,
            InboxFilter::Unread => self.unread_count > 0,
            InboxFilter::Action => self.has_pending_action,
        }
    }
}

/// A booking row in the client inbox.
#[derive(Debug, Clone, Copy)]
pub struct BookingRow<'a> {
    pub booking: &'a Booking,
    pub summary: BookingSummary<'a>,
}

impl BookingRow<'_> {
    fn passes(&self, filter: InboxFilter) -> bool {
        match filter {
            InboxFilter::All => true,
            InboxFilter::Unread => self.summary.total_unread > 0,
            InboxFilter::Action => self.summary.has_pending_action,
        }
    }
}

/// Badge counts shown on the filter chips, independent of scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InboxBadges {
    /// Projects with a pending action, plus the support thread if it has one.
    pub action: usize,
    /// Projects with unread messages, plus the support thread if it has any.
    pub unread: usize,
}

/// The client inbox under one scope and filter.
#[derive(Debug, Clone)]
pub struct ClientInbox<'a> {
    pub bookings: Vec<BookingRow<'a>>,
    /// Present when the support thread exists and passes scope and filter.
    pub support: Option<SupportSummary<'a>>,
    pub badges: InboxBadges,
}

/// The thread between `client_id` and platform support.
pub fn support_thread<'a>(store: &'a EntityStore, client_id: &str) -> Option<&'a Thread> {
    store.threads().find(|t| {
        t.client_id == client_id
            && store
                .user(t.staff_id.as_str())
                .is_some_and(|u| u.role == Role::Admin)
    })
}

pub fn analyze_support_thread<'a>(store: &'a EntityStore, thread: &'a Thread) -> SupportSummary<'a> {
    let last_message = store.last_message(thread);
    SupportSummary {
        thread,
        last_message,
        has_pending_action: last_message.and_then(Message::pending_action).is_some(),
        is_urgent: false,
        unread_count: thread.unread_count,
    }
}

pub fn client_inbox<'a>(store: &'a EntityStore, options: InboxOptions<'_>) -> ClientInbox<'a> {
    let projects: Vec<BookingRow<'a>> = store
        .bookings()
        .filter(|b| b.id != options.system_booking_id)
        .map(|booking| BookingRow {
            booking,
            summary: analyze_booking(store, booking),
        })
        .collect();
    let support = support_thread(store, options.client_id).map(|t| analyze_support_thread(store, t));

    let badges = InboxBadges {
        action: projects.iter().filter(|r| r.summary.has_pending_action).count()
            + usize::from(support.is_some_and(|s| s.has_pending_action)),
        unread: projects.iter().filter(|r| r.summary.total_unread > 0).count()
            + usize::from(support.is_some_and(|s| s.unread_count > 0)),
    };

    let bookings = if options.scope == InboxScope::System {
        Vec::new()
    } else {
        projects
            .into_iter()
            .filter(|row| row.passes(options.filter))
            .collect()
    };

    let support = support
        .filter(|_| options.scope != InboxScope::Projects)
        .filter(|s| s.passes(options.filter));

    ClientInbox {
        bookings,
        support,
        badges,
    }
}

impl ClientInbox<'_> {
    /// The support thread's id if it is listed.
    pub fn support_thread_id(&self) -> Option<&ThreadId> {
        self.support.as_ref().map(|s| &s.thread.id)
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty() && self.support.is_none()
    }
}
