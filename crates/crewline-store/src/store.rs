// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The entity store: the only mutable state in crewline.
//!
//! Readers borrow it shared; the mutation engine borrows it exclusively.
//! Nothing here re-validates referential integrity on read. Lookups by an
//! unknown id return `None`.

use crewline_core::{MessageId, ThreadId};
use tracing::{debug, warn};

use crate::models::{ActivityItem, Booking, Message, Shift, Thread, User};
use crate::seed::Seed;
use crate::table::Table;

/// Monotonic source of message ids: `<prefix>-<seq:08>`.
///
/// Zero-padding keeps string order equal to generation order.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: String,
    next: u64,
}

impl IdSequence {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// A sequence whose ids all sort after `latest`.
    ///
    /// If the first id under `prefix` would not, the prefix is extended with
    /// `latest` itself, which every longer string starting with it follows.
    pub fn after(prefix: &str, latest: Option<&MessageId>) -> Self {
        let first = format!("{prefix}-{:08}", 1);
        match latest {
            Some(latest) if latest.as_str() >= first.as_str() => {
                warn!(
                    prefix,
                    latest_seed_id = %latest,
                    "id prefix sorts before seeded ids, extending it"
                );
                Self::new(format!("{latest}-{prefix}"))
            }
            _ => Self::new(prefix),
        }
    }

    fn advance(&mut self, thread: Option<&ThreadId>) -> MessageId {
        let seq = self.next;
        self.next += 1;
        match thread {
            Some(thread) => MessageId(format!("{}-{seq:08}-{thread}", self.prefix)),
            None => MessageId(format!("{}-{seq:08}", self.prefix)),
        }
    }
}

/// Users, shifts, bookings, threads, messages, and the activity feed.
#[derive(Debug, Clone)]
pub struct EntityStore {
    users: Table<User>,
    shifts: Table<Shift>,
    bookings: Table<Booking>,
    threads: Table<Thread>,
    messages: Table<Message>,
    activities: Vec<ActivityItem>,
    ids: IdSequence,
}

impl EntityStore {
    /// Build a store from a seed snapshot.
    ///
    /// Lint findings are logged and otherwise ignored: the seed is trusted.
    pub fn from_seed(seed: Seed, id_prefix: &str) -> Self {
        for finding in seed.lint() {
            warn!(%finding, "seed lint");
        }

        let ids = IdSequence::after(id_prefix, seed.messages.iter().map(|m| &m.id).max());
        let store = Self {
            users: seed.users.into_iter().collect(),
            shifts: seed.shifts.into_iter().collect(),
            bookings: seed.bookings.into_iter().collect(),
            threads: seed.threads.into_iter().collect(),
            messages: seed.messages.into_iter().collect(),
            activities: seed.activities,
            ids,
        };

        debug!(
            users = store.users.len(),
            bookings = store.bookings.len(),
            threads = store.threads.len(),
            messages = store.messages.len(),
            "entity store seeded"
        );
        store
    }

    /// Snapshot the store back into seed form.
    pub fn to_seed(&self) -> Seed {
        Seed {
            users: self.users.iter().cloned().collect(),
            shifts: self.shifts.iter().cloned().collect(),
            bookings: self.bookings.iter().cloned().collect(),
            threads: self.threads.iter().cloned().collect(),
            messages: self.messages.iter().cloned().collect(),
            activities: self.activities.clone(),
        }
    }

    // --- reads ---

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn shift(&self, id: &str) -> Option<&Shift> {
        self.shifts.get(id)
    }

    pub fn booking(&self, id: &str) -> Option<&Booking> {
        self.bookings.get(id)
    }

    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.get(id)
    }

    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn bookings(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter()
    }

    pub fn threads(&self) -> impl Iterator<Item = &Thread> {
        self.threads.iter()
    }

    /// Every message in append order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn activities(&self) -> impl Iterator<Item = &ActivityItem> {
        self.activities.iter()
    }

    /// Threads under a booking, in seed/creation order.
    pub fn threads_for_booking<'a>(
        &'a self,
        booking_id: &'a str,
    ) -> impl Iterator<Item = &'a Thread> + 'a {
        self.threads.iter().filter(move |t| t.booking_id == booking_id)
    }

    /// Messages of one thread in append order.
    pub fn messages_in_thread<'a>(
        &'a self,
        thread_id: &'a str,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| m.thread_id == thread_id)
    }

    /// The booking's shifts in booking order, skipping ids with no shift.
    pub fn booking_shifts<'a>(
        &'a self,
        booking: &'a Booking,
    ) -> impl Iterator<Item = &'a Shift> + 'a {
        booking
            .shifts
            .iter()
            .filter_map(move |id| self.shifts.get(id.as_str()))
    }

    /// The message a thread's last-message pointer refers to, if it exists.
    pub fn last_message(&self, thread: &Thread) -> Option<&Message> {
        thread
            .last_message_id
            .as_ref()
            .and_then(|id| self.messages.get(id.as_str()))
    }

    // --- writes (mutation engine only) ---

    /// A fresh message id no existing message uses.
    pub fn next_message_id(&mut self) -> MessageId {
        loop {
            let id = self.ids.advance(None);
            if !self.messages.contains(id.as_str()) {
                return id;
            }
        }
    }

    /// A fresh message id for one copy of a broadcast, tagged with its thread.
    pub fn next_broadcast_id(&mut self, thread: &ThreadId) -> MessageId {
        loop {
            let id = self.ids.advance(Some(thread));
            if !self.messages.contains(id.as_str()) {
                return id;
            }
        }
    }

    /// Append a message to the log.
    ///
    /// The caller guarantees the id is fresh and the thread exists.
    pub fn append_message(&mut self, message: Message) {
        self.messages.insert(message);
    }

    pub fn thread_mut(&mut self, id: &str) -> Option<&mut Thread> {
        self.threads.get_mut(id)
    }

    pub fn message_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.messages.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_builds_full_store() {
        let store = EntityStore::from_seed(Seed::demo(), "new");
        assert_eq!(store.users().count(), 7);
        assert_eq!(store.bookings().count(), 3);
        assert_eq!(store.threads().count(), 6);
        assert_eq!(store.messages().count(), 9);
        assert_eq!(store.activities().count(), 5);
        assert!(store.shift("s-open-2").is_some());
    }

    #[test]
    fn threads_for_booking_keep_seed_order() {
        let store = EntityStore::from_seed(Seed::demo(), "new");
        let ids: Vec<_> = store
            .threads_for_booking("booking-george")
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["t-me-george", "t-ben-george", "t-charlie-george", "t-david-george"]
        );
    }

    #[test]
    fn generated_ids_are_ordered_and_sort_after_seed_ids() {
        let mut store = EntityStore::from_seed(Seed::demo(), "new");
        let first = store.next_message_id();
        let second = store.next_broadcast_id(&ThreadId::from("t-ben-george"));
        assert_eq!(first.as_str(), "new-00000001");
        assert_eq!(second.as_str(), "new-00000002-t-ben-george");
        assert!(second > first);
        let newest_seed = store.messages().map(|m| &m.id).max().unwrap().clone();
        assert!(first > newest_seed);
    }

    #[test]
    fn generated_ids_never_collide_with_seeded_ones() {
        let mut seed = Seed::demo();
        let mut taken = seed.messages[0].clone();
        taken.id = MessageId::from("new-00000001");
        seed.messages.push(taken);

        let mut store = EntityStore::from_seed(seed, "new");
        let id = store.next_message_id();
        assert_ne!(id, "new-00000001");
        assert!(id.as_str() > "new-00000001");
    }

    #[test]
    fn late_sorting_seed_ids_extend_the_prefix() {
        let mut seed = Seed::demo();
        let mut reply = seed.messages[0].clone();
        reply.id = MessageId::from("reply-1");
        seed.messages.push(reply);

        let mut store = EntityStore::from_seed(seed, "new");
        let sent = store.next_message_id();
        let copy = store.next_broadcast_id(&ThreadId::from("t-ben-george"));
        assert_eq!(sent.as_str(), "reply-1-new-00000001");
        assert!(sent.as_str() > "reply-1");
        assert!(copy > sent);
    }

    #[test]
    fn early_sorting_seed_ids_keep_the_prefix() {
        let seq = IdSequence::after("new", Some(&MessageId::from("msg-z")));
        assert_eq!(seq.prefix, "new");
        let seq = IdSequence::after("new", None);
        assert_eq!(seq.prefix, "new");
    }

    #[test]
    fn last_message_follows_pointer() {
        let store = EntityStore::from_seed(Seed::demo(), "new");
        let thread = store.thread("t-me-george").unwrap();
        assert_eq!(store.last_message(thread).unwrap().id, "msg-g-2");
    }

    #[test]
    fn dangling_last_message_is_absent() {
        let mut seed = Seed::demo();
        seed.threads[0].last_message_id = Some(MessageId::from("gone"));
        let store = EntityStore::from_seed(seed, "new");
        let thread = store.thread("t-me-george").unwrap();
        assert!(store.last_message(thread).is_none());
    }

    #[test]
    fn booking_shifts_skip_missing_ids() {
        let mut seed = Seed::demo();
        seed.bookings[1].shifts.push("no-such-shift".into());
        let store = EntityStore::from_seed(seed, "new");
        let booking = store.booking("booking-mascot").unwrap();
        assert_eq!(store.booking_shifts(booking).count(), 1);
    }

    #[test]
    fn to_seed_round_trips_counts() {
        let store = EntityStore::from_seed(Seed::demo(), "new");
        let seed = store.to_seed();
        assert_eq!(seed.shifts.len(), 15);
        assert_eq!(seed.messages.len(), 9);
    }
}
