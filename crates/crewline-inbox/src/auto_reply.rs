// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted client replies.
//!
//! After the local user posts into a thread, the thread's client answers
//! with a canned line once a delay has passed. The timer runs on a spawned
//! task that never touches the store: when it fires it sends a
//! [`ScheduledReply`] to whoever owns the store, and the owner applies it
//! with [`MutationEngine::apply_reply`](crate::MutationEngine::apply_reply).
//!
//! Each thread's pending replies share one [`CancellationToken`]. Closing
//! the thread cancels them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crewline_config::model::AutoReplyConfig;
use crewline_core::{ThreadId, UserId};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A reply whose delay has elapsed, ready to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReply {
    pub thread_id: ThreadId,
    pub sender_id: UserId,
    pub content: String,
}

/// Replies still waiting on one thread.
#[derive(Debug)]
struct Pending {
    token: CancellationToken,
    /// Distinguishes this entry from one created after a cancel.
    generation: u64,
    outstanding: usize,
}

type PendingMap = HashMap<ThreadId, Pending>;

fn lock(pending: &Mutex<PendingMap>) -> MutexGuard<'_, PendingMap> {
    pending.lock().unwrap_or_else(|e| e.into_inner())
}

/// Forget one fired reply; the entry goes once none are left.
fn release(pending: &Mutex<PendingMap>, thread_id: &ThreadId, generation: u64) {
    let mut pending = lock(pending);
    let Some(entry) = pending.get_mut(thread_id) else {
        return;
    };
    if entry.generation != generation {
        return;
    }
    entry.outstanding = entry.outstanding.saturating_sub(1);
    if entry.outstanding == 0 {
        pending.remove(thread_id);
    }
}

/// Spawns delayed replies and hands them back over a channel.
#[derive(Debug)]
pub struct AutoReplyScheduler {
    enabled: bool,
    delay: Duration,
    content: String,
    tx: mpsc::UnboundedSender<ScheduledReply>,
    pending: Arc<Mutex<PendingMap>>,
    next_generation: AtomicU64,
}

impl AutoReplyScheduler {
    /// Create a scheduler and the receiver its replies arrive on.
    pub fn new(config: &AutoReplyConfig) -> (Self, mpsc::UnboundedReceiver<ScheduledReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            enabled: config.enabled,
            delay: Duration::from_millis(config.delay_ms),
            content: config.content.clone(),
            tx,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        };
        (scheduler, rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Threads with at least one reply still waiting.
    pub fn pending_threads(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Schedule a reply from `client_id` into `thread_id`.
    ///
    /// Must be called from within a tokio runtime. Returns `false` when
    /// auto-replies are disabled.
    pub fn schedule(&self, thread_id: &ThreadId, client_id: &UserId) -> bool {
        if !self.enabled {
            return false;
        }

        let (token, generation) = {
            let mut pending = lock(&self.pending);
            let entry = pending.entry(thread_id.clone()).or_insert_with(|| Pending {
                token: CancellationToken::new(),
                generation: self.next_generation.fetch_add(1, Ordering::Relaxed),
                outstanding: 0,
            });
            entry.outstanding += 1;
            (entry.token.clone(), entry.generation)
        };

        let reply = ScheduledReply {
            thread_id: thread_id.clone(),
            sender_id: client_id.clone(),
            content: self.content.clone(),
        };
        let tx = self.tx.clone();
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;

        debug!(
            thread_id = %reply.thread_id,
            delay_ms = delay.as_millis() as u64,
            "auto-reply scheduled"
        );

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(thread_id = %reply.thread_id, "auto-reply cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    let thread_id = reply.thread_id.clone();
                    release(&pending, &thread_id, generation);
                    if tx.send(reply).is_err() {
                        debug!(%thread_id, "auto-reply dropped, receiver closed");
                    }
                }
            }
        });

        true
    }

    /// Cancel every reply still pending for a thread.
    pub fn cancel_thread(&self, thread_id: &str) {
        let entry = lock(&self.pending).remove(thread_id);
        if let Some(entry) = entry {
            entry.token.cancel();
            debug!(%thread_id, "pending auto-replies cancelled");
        }
    }

    /// Cancel every pending reply on every thread.
    pub fn cancel_all(&self) {
        let entries: Vec<_> = lock(&self.pending).drain().collect();
        for (_, entry) in &entries {
            entry.token.cancel();
        }
        debug!(threads = entries.len(), "all pending auto-replies cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(delay_ms: u64) -> AutoReplyConfig {
        AutoReplyConfig {
            enabled: true,
            delay_ms,
            content: "Thanks for the update!".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let (scheduler, mut rx) = AutoReplyScheduler::new(&config(2000));
        assert!(scheduler.schedule(&"t-me-george".into(), &"steve".into()));
        // Let the task start its timer before moving the clock.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(1999)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        let reply = rx.recv().await.expect("reply delivered");
        assert_eq!(reply.thread_id, "t-me-george");
        assert_eq!(reply.sender_id, "steve");
        assert_eq!(reply.content, "Thanks for the update!");
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_thread_gets_no_reply() {
        let (scheduler, mut rx) = AutoReplyScheduler::new(&config(2000));
        scheduler.schedule(&"t-1".into(), &"steve".into());
        scheduler.schedule(&"t-2".into(), &"sarah".into());
        scheduler.cancel_thread("t-1");

        tokio::time::advance(Duration::from_millis(5000)).await;
        let reply = rx.recv().await.expect("t-2 reply delivered");
        assert_eq!(reply.thread_id, "t-2");
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn thread_can_be_scheduled_again_after_cancel() {
        let (scheduler, mut rx) = AutoReplyScheduler::new(&config(100));
        scheduler.schedule(&"t-1".into(), &"steve".into());
        scheduler.cancel_thread("t-1");
        scheduler.schedule(&"t-1".into(), &"steve".into());

        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(rx.recv().await.expect("reply").thread_id, "t-1");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_silences_everything() {
        let (scheduler, mut rx) = AutoReplyScheduler::new(&config(100));
        scheduler.schedule(&"t-1".into(), &"steve".into());
        scheduler.schedule(&"t-2".into(), &"steve".into());
        scheduler.cancel_all();

        tokio::time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn fired_replies_leave_nothing_pending() {
        let (scheduler, mut rx) = AutoReplyScheduler::new(&config(100));
        scheduler.schedule(&"t-1".into(), &"steve".into());
        scheduler.schedule(&"t-1".into(), &"steve".into());
        scheduler.schedule(&"t-2".into(), &"sarah".into());
        assert_eq!(scheduler.pending_threads(), 2);

        for _ in 0..3 {
            rx.recv().await.expect("reply");
        }
        assert_eq!(scheduler.pending_threads(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_reply_does_not_release_a_newer_schedule() {
        let (scheduler, mut rx) = AutoReplyScheduler::new(&config(100));
        let thread: ThreadId = "t-1".into();
        let stale = {
            scheduler.schedule(&thread, &"steve".into());
            lock(&scheduler.pending)[&thread].generation
        };
        scheduler.cancel_thread("t-1");
        scheduler.schedule(&thread, &"steve".into());

        release(&scheduler.pending, &thread, stale);
        assert_eq!(scheduler.pending_threads(), 1);

        assert_eq!(rx.recv().await.expect("reply").thread_id, "t-1");
        assert_eq!(scheduler.pending_threads(), 0);
    }

    #[tokio::test]
    async fn disabled_scheduler_does_nothing() {
        let mut cfg = config(0);
        cfg.enabled = false;
        let (scheduler, mut rx) = AutoReplyScheduler::new(&cfg);
        assert!(!scheduler.is_enabled());
        assert!(!scheduler.schedule(&"t-1".into(), &"steve".into()));
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
