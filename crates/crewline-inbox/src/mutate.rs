// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writes against the entity store: send, broadcast, resolve.
//!
//! Every operation takes the store by exclusive reference, checks its input
//! before touching anything, and either applies completely or not at all.
//! Writes aimed at absent rows are no-ops, not errors.

use crewline_core::{Clock, CrewlineError, MessageId, MessageType, SystemClock, ThreadId, UserId};
use crewline_store::{EntityStore, Message};
use tracing::{debug, info, warn};

use crate::auto_reply::{AutoReplyScheduler, ScheduledReply};

/// Display timestamp stamped on every message created here.
pub const JUST_NOW: &str = "Just now";

/// What a broadcast delivered: one message per thread of the booking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BroadcastReceipt {
    pub messages: Vec<Message>,
}

impl BroadcastReceipt {
    /// How many threads received a copy.
    pub fn recipient_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Applies user intents to the store.
#[derive(Debug)]
pub struct MutationEngine<C: Clock = SystemClock> {
    clock: C,
    self_id: UserId,
    auto_reply: Option<AutoReplyScheduler>,
}

impl MutationEngine<SystemClock> {
    /// An engine on the wall clock acting as `self_id`.
    pub fn with_system_clock(self_id: impl Into<UserId>) -> Self {
        Self::new(SystemClock, self_id)
    }
}

impl<C: Clock> MutationEngine<C> {
    pub fn new(clock: C, self_id: impl Into<UserId>) -> Self {
        Self {
            clock,
            self_id: self_id.into(),
            auto_reply: None,
        }
    }

    /// Schedule scripted client replies after self-sent messages.
    pub fn with_auto_reply(mut self, scheduler: AutoReplyScheduler) -> Self {
        self.auto_reply = Some(scheduler);
        self
    }

    pub fn self_id(&self) -> &UserId {
        &self.self_id
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn auto_reply(&self) -> Option<&AutoReplyScheduler> {
        self.auto_reply.as_ref()
    }

    fn stamp(&self, id: MessageId, thread_id: ThreadId, sender_id: UserId, content: &str) -> Message {
        Message {
            id,
            thread_id,
            sender_id,
            content: content.to_string(),
            timestamp: JUST_NOW.to_string(),
            sent_at: Some(self.clock.now()),
            message_type: MessageType::Text,
            is_read: true,
            action: None,
        }
    }

    /// Post `content` into a thread as `sender_id`.
    ///
    /// A self-sent message clears the thread's unread counter; anyone else's
    /// bumps it by one. Returns `Ok(None)` when the thread does not exist.
    pub fn send_message(
        &self,
        store: &mut EntityStore,
        thread_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Option<Message>, CrewlineError> {
        if content.trim().is_empty() {
            return Err(CrewlineError::rejected("message content is empty"));
        }

        let Some(thread) = store.thread(thread_id) else {
            warn!(%thread_id, "send dropped: no such thread");
            return Ok(None);
        };
        let thread_id = thread.id.clone();
        let client_id = thread.client_id.clone();

        let id = store.next_message_id();
        let message = self.stamp(id, thread_id.clone(), UserId::from(sender_id), content);
        store.append_message(message.clone());

        let from_self = message.sender_id == self.self_id;
        if let Some(thread) = store.thread_mut(thread_id.as_str()) {
            thread.last_message_id = Some(message.id.clone());
            thread.unread_count = if from_self {
                0
            } else {
                thread.unread_count.saturating_add(1)
            };
        }

        info!(
            %thread_id,
            message_id = %message.id,
            sender_id = %message.sender_id,
            "message sent"
        );

        if let Some(scheduler) = self.auto_reply.as_ref().filter(|_| from_self) {
            scheduler.schedule(&thread_id, &client_id);
        }

        Ok(Some(message))
    }

    /// Fan `content` out to every thread of a booking as the local user.
    ///
    /// Each copy gets its own id and clears its thread's unread counter.
    /// A booking with no threads, or no booking at all, yields an empty
    /// receipt.
    pub fn broadcast(
        &self,
        store: &mut EntityStore,
        booking_id: &str,
        content: &str,
    ) -> Result<BroadcastReceipt, CrewlineError> {
        if content.trim().is_empty() {
            return Err(CrewlineError::rejected("broadcast content is empty"));
        }

        let targets: Vec<ThreadId> = store
            .threads_for_booking(booking_id)
            .map(|t| t.id.clone())
            .collect();
        if targets.is_empty() {
            debug!(%booking_id, "broadcast has no recipients");
            return Ok(BroadcastReceipt::default());
        }

        let mut messages = Vec::with_capacity(targets.len());
        for thread_id in targets {
            let id = store.next_broadcast_id(&thread_id);
            let message = Message {
                message_type: MessageType::Broadcast,
                ..self.stamp(id, thread_id.clone(), self.self_id.clone(), content)
            };
            store.append_message(message.clone());
            if let Some(thread) = store.thread_mut(thread_id.as_str()) {
                thread.last_message_id = Some(message.id.clone());
                thread.unread_count = 0;
            }
            messages.push(message);
        }

        info!(%booking_id, recipients = messages.len(), "broadcast sent");
        Ok(BroadcastReceipt { messages })
    }

    /// Mark a message's pending action resolved.
    ///
    /// Idempotent. Returns the message as it now stands, or `None` if there
    /// is no such message.
    pub fn resolve_action(&self, store: &mut EntityStore, message_id: &str) -> Option<Message> {
        let Some(message) = store.message_mut(message_id) else {
            debug!(%message_id, "resolve skipped: no such message");
            return None;
        };

        match message.action.as_mut() {
            Some(action) => {
                if action.resolve() {
                    info!(%message_id, action_type = %action.action_type, "action resolved");
                } else {
                    debug!(%message_id, "resolve skipped: already resolved");
                }
            }
            None => debug!(%message_id, "resolve skipped: message carries no action"),
        }

        Some(message.clone())
    }

    /// Append a scripted reply that has come due.
    ///
    /// Applies against whatever the thread looks like now. The thread's
    /// unread counter is cleared since the chat is assumed open.
    pub fn apply_reply(&self, store: &mut EntityStore, reply: ScheduledReply) -> Option<Message> {
        if store.thread(reply.thread_id.as_str()).is_none() {
            warn!(thread_id = %reply.thread_id, "auto-reply dropped: no such thread");
            return None;
        }

        let id = store.next_message_id();
        let message = Message {
            is_read: false,
            ..self.stamp(id, reply.thread_id.clone(), reply.sender_id, &reply.content)
        };
        store.append_message(message.clone());
        if let Some(thread) = store.thread_mut(reply.thread_id.as_str()) {
            thread.last_message_id = Some(message.id.clone());
            thread.unread_count = 0;
        }

        info!(
            thread_id = %reply.thread_id,
            message_id = %message.id,
            "auto-reply delivered"
        );
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crewline_core::ActionStatus;
    use crewline_store::Seed;
    use crewline_test_utils::{ManualClock, SeedBuilder};

    use super::*;

    fn engine() -> MutationEngine<ManualClock> {
        MutationEngine::new(ManualClock::default(), "me")
    }

    fn demo() -> EntityStore {
        EntityStore::from_seed(Seed::demo(), "new")
    }

    #[test]
    fn self_send_clears_unread_and_moves_pointer() {
        let engine = engine();
        let mut store = demo();
        let sent = engine
            .send_message(&mut store, "t-me-george", "me", "On my way")
            .unwrap()
            .expect("thread exists");

        assert_eq!(sent.id, "new-00000001");
        assert_eq!(sent.timestamp, JUST_NOW);
        assert_eq!(sent.sent_at, Some(engine.clock().now()));
        assert_eq!(sent.message_type, MessageType::Text);
        assert!(sent.is_read);

        let thread = store.thread("t-me-george").unwrap();
        assert_eq!(thread.unread_count, 0);
        assert_eq!(thread.last_message_id.as_ref(), Some(&sent.id));
        assert_eq!(store.messages_in_thread("t-me-george").count(), 4);
    }

    #[test]
    fn other_sender_bumps_unread() {
        let engine = engine();
        let mut store = demo();
        engine
            .send_message(&mut store, "t-me-george", "steve", "See you at 7")
            .unwrap();
        engine
            .send_message(&mut store, "t-me-george", "steve", "Bring gloves")
            .unwrap();
        assert_eq!(store.thread("t-me-george").unwrap().unread_count, 3);
    }

    #[test]
    fn blank_content_is_rejected_before_any_write() {
        let engine = engine();
        let mut store = demo();
        let err = engine
            .send_message(&mut store, "t-me-george", "me", "   \n")
            .unwrap_err();
        assert!(matches!(err, CrewlineError::InputRejected { .. }));
        assert_eq!(store.messages().count(), 9);
        assert_eq!(store.thread("t-me-george").unwrap().unread_count, 1);

        let err = engine.broadcast(&mut store, "booking-george", "").unwrap_err();
        assert!(matches!(err, CrewlineError::InputRejected { .. }));
        assert_eq!(store.messages().count(), 9);
    }

    #[test]
    fn send_to_missing_thread_is_a_no_op() {
        let engine = engine();
        let mut store = demo();
        let sent = engine
            .send_message(&mut store, "t-nobody", "me", "hello")
            .unwrap();
        assert!(sent.is_none());
        assert_eq!(store.messages().count(), 9);
    }

    #[test]
    fn broadcast_fans_out_in_thread_order() {
        let engine = engine();
        let mut store = demo();
        let receipt = engine
            .broadcast(&mut store, "booking-george", "Site closes at 2pm")
            .unwrap();

        assert_eq!(receipt.recipient_count(), 4);
        let threads: Vec<_> = receipt
            .messages
            .iter()
            .map(|m| m.thread_id.as_str())
            .collect();
        assert_eq!(
            threads,
            vec!["t-me-george", "t-ben-george", "t-charlie-george", "t-david-george"]
        );
        assert_eq!(receipt.messages[1].id, "new-00000002-t-ben-george");
        for message in &receipt.messages {
            assert_eq!(message.message_type, MessageType::Broadcast);
            assert_eq!(message.sender_id, "me");
            let thread = store.thread(message.thread_id.as_str()).unwrap();
            assert_eq!(thread.unread_count, 0);
            assert_eq!(thread.last_message_id.as_ref(), Some(&message.id));
        }
    }

    #[test]
    fn broadcast_without_threads_is_empty() {
        let engine = engine();
        let mut store = SeedBuilder::new().booking("b1", "steve").store();
        let receipt = engine.broadcast(&mut store, "b1", "Hello").unwrap();
        assert!(receipt.is_empty());
        assert!(engine.broadcast(&mut store, "nope", "Hello").unwrap().is_empty());
        assert_eq!(store.messages().count(), 0);
    }

    #[test]
    fn resolve_is_idempotent() {
        let engine = engine();
        let mut store = demo();
        let first = engine
            .resolve_action(&mut store, "msg-action-charlie")
            .expect("message exists");
        assert_eq!(first.action.as_ref().unwrap().status, ActionStatus::Resolved);

        let second = engine
            .resolve_action(&mut store, "msg-action-charlie")
            .expect("message exists");
        assert_eq!(first, second);
        assert!(store.message("msg-action-charlie").unwrap().pending_action().is_none());
    }

    #[test]
    fn resolve_ignores_missing_and_plain_messages() {
        let engine = engine();
        let mut store = demo();
        assert!(engine.resolve_action(&mut store, "msg-gone").is_none());
        let plain = engine.resolve_action(&mut store, "msg-g-1").unwrap();
        assert!(plain.action.is_none());
    }

    #[test]
    fn reply_lands_unread_with_counter_cleared() {
        let engine = engine();
        let mut store = demo();
        engine.clock().advance(Duration::seconds(2));
        let reply = engine
            .apply_reply(
                &mut store,
                ScheduledReply {
                    thread_id: "t-ben-george".into(),
                    sender_id: "steve".into(),
                    content: "Thanks for the update!".into(),
                },
            )
            .expect("thread exists");

        assert!(!reply.is_read);
        assert_eq!(reply.sender_id, "steve");
        let thread = store.thread("t-ben-george").unwrap();
        assert_eq!(thread.unread_count, 0);
        assert_eq!(thread.last_message_id.as_ref(), Some(&reply.id));

        let dropped = engine.apply_reply(
            &mut store,
            ScheduledReply {
                thread_id: "t-gone".into(),
                sender_id: "steve".into(),
                content: "hi".into(),
            },
        );
        assert!(dropped.is_none());
    }
}
