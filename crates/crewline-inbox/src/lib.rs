// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbox engines for crewline.
//!
//! [`aggregate`] and [`inbox`] derive read models from a borrowed
//! [`EntityStore`](crewline_store::EntityStore); [`mutate`] is the only code
//! that writes to it. [`auto_reply`] runs the scripted client replies and
//! [`view`] holds navigation state for a presentation layer.

pub mod aggregate;
pub mod auto_reply;
pub mod inbox;
pub mod mutate;
pub mod view;

pub use aggregate::{
    BookingSummary, Relationship, RelationshipEntry, ThreadPreview, WorkerEntry, WorkerRoster,
    analyze_booking, collect_activity, collect_broadcasts, group_workers_by_booking,
    relationship, staff_threads, thread_context_shifts, thread_preview,
};
pub use auto_reply::{AutoReplyScheduler, ScheduledReply};
pub use inbox::{
    BookingRow, ClientInbox, InboxBadges, InboxFilter, InboxOptions, InboxScope, SupportSummary,
    analyze_support_thread, client_inbox, support_thread,
};
pub use mutate::{BroadcastReceipt, JUST_NOW, MutationEngine};
pub use view::{Persona, View};
