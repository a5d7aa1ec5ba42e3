// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text screens for the CLI and shell.

use colored::Colorize;
use crewline_core::{ActionStatus, MessageType, ShiftStatus};
use crewline_inbox::{
    ClientInbox, Relationship, analyze_booking, collect_activity, collect_broadcasts,
    group_workers_by_booking, staff_threads, thread_context_shifts, thread_preview,
};
use crewline_store::{EntityStore, Message, Shift};

/// Display name for a sender id.
fn name_of(store: &EntityStore, id: &str) -> String {
    match store.user(id) {
        Some(user) => user.name.clone(),
        None if id == "system" => "System".to_string(),
        None => id.to_string(),
    }
}

fn unread_badge(count: u32) -> String {
    if count == 0 {
        String::new()
    } else {
        format!(" ({count} unread)").blue().bold().to_string()
    }
}

fn shift_line(shift: &Shift) -> String {
    let status = match shift.status {
        ShiftStatus::Active => shift.status.to_string().green(),
        ShiftStatus::Open => shift.status.to_string().yellow(),
        ShiftStatus::Cancelled => shift.status.to_string().red(),
        _ => shift.status.to_string().dimmed(),
    };
    format!(
        "  {}  {} {} @ {} [{status}]",
        shift.id, shift.date, shift.time, shift.location
    )
}

fn message_line(store: &EntityStore, message: &Message) -> String {
    let sender = name_of(store, message.sender_id.as_str());
    let mut line = match message.message_type {
        MessageType::System => format!("  -- {} --", message.content).dimmed().to_string(),
        MessageType::Broadcast => format!(
            "  {} {}: {}",
            "[broadcast]".magenta(),
            sender.bold(),
            message.content
        ),
        MessageType::Text | MessageType::Action => {
            format!("  {}: {}", sender.bold(), message.content)
        }
    };
    line.push_str(&format!("  {}", message.timestamp.dimmed()));

    if let Some(action) = &message.action {
        let status = match action.status {
            ActionStatus::Pending => "PENDING".yellow().bold(),
            ActionStatus::Resolved => "RESOLVED".green(),
        };
        line.push_str(&format!(
            "\n      [{}] {}{} [{status}]  (id: {})",
            action.action_type,
            action.title,
            action
                .details
                .as_deref()
                .map(|d| format!(" - {d}"))
                .unwrap_or_default(),
            message.id
        ));
    }
    line
}

/// The local worker's threads with their last line.
pub fn staff_inbox(store: &EntityStore, staff_id: &str) -> String {
    let mut lines = vec![format!("{}", "Inbox".bold())];
    let threads = staff_threads(store, staff_id);
    if threads.is_empty() {
        lines.push("  no conversations".dimmed().to_string());
    }
    for thread in threads {
        let preview = thread_preview(store, thread);
        let booking = preview.booking.map_or("?", |b| b.title.as_str());
        let client = preview.client.map_or("?", |u| u.name.as_str());
        let last = preview
            .last_message
            .map_or_else(|| "No messages yet".to_string(), |m| m.content.clone());
        lines.push(format!(
            "  {}  {} - {}{}",
            thread.id.to_string().cyan(),
            booking.bold(),
            client,
            unread_badge(thread.unread_count)
        ));
        lines.push(format!("      {last}"));
    }
    lines.join("\n")
}

/// One conversation with its shift context.
pub fn chat(store: &EntityStore, thread_id: &str) -> String {
    let Some(thread) = store.thread(thread_id) else {
        return format!("no such thread: {thread_id}");
    };
    let preview = thread_preview(store, thread);
    let mut lines = vec![format!(
        "{} - {}",
        preview.client.map_or("?", |u| u.name.as_str()).bold(),
        preview.booking.map_or("?", |b| b.title.as_str())
    )];

    let shifts = thread_context_shifts(store, thread);
    if !shifts.is_empty() {
        lines.push(format!("{}", "Shifts".underline()));
        lines.extend(shifts.into_iter().map(shift_line));
    }

    lines.push(String::new());
    let mut any = false;
    for message in store.messages_in_thread(thread_id) {
        lines.push(message_line(store, message));
        any = true;
    }
    if !any {
        lines.push("  no messages yet".dimmed().to_string());
    }
    lines.join("\n")
}

/// Projects and support for the client persona.
pub fn client_inbox(store: &EntityStore, inbox: &ClientInbox<'_>) -> String {
    let mut lines = vec![format!(
        "{}  action: {}  unread: {}",
        "Inbox".bold(),
        inbox.badges.action,
        inbox.badges.unread
    )];

    if let Some(support) = &inbox.support {
        let flag = if support.has_pending_action {
            " [action]".yellow().to_string()
        } else {
            String::new()
        };
        lines.push(format!(
            "  {}  {}{}{}",
            support.thread.id.to_string().cyan(),
            name_of(store, support.thread.staff_id.as_str()).bold(),
            flag,
            unread_badge(support.unread_count)
        ));
        if let Some(last) = support.last_message {
            lines.push(format!("      {}", last.content));
        }
    }

    for row in &inbox.bookings {
        let summary = &row.summary;
        let flag = if summary.is_urgent_action {
            " [urgent]".red().bold().to_string()
        } else if summary.has_pending_action {
            " [action]".yellow().to_string()
        } else {
            String::new()
        };
        lines.push(format!(
            "  {}  {}{}{}  {} active",
            row.booking.id.to_string().cyan(),
            row.booking.title.bold(),
            flag,
            unread_badge(summary.total_unread),
            summary.active_shift_count
        ));
        if let Some(latest) = summary.latest_message {
            lines.push(format!(
                "      {}: {}",
                name_of(store, latest.sender_id.as_str()),
                latest.content
            ));
        }
    }

    if inbox.is_empty() {
        lines.push("  nothing matches".dimmed().to_string());
    }
    lines.join("\n")
}

/// Staff roster, broadcast log, and activity feed for a booking.
pub fn booking_detail(store: &EntityStore, booking_id: &str) -> String {
    let Some(booking) = store.booking(booking_id) else {
        return format!("no such booking: {booking_id}");
    };
    let roster = group_workers_by_booking(store, booking);
    let summary = analyze_booking(store, booking);

    let mut lines = vec![
        format!("{}", booking.title.bold()),
        format!(
            "  {} shifts, {} staff, {} active, {} unread",
            roster.total_shifts,
            roster.workers.len(),
            summary.active_shift_count,
            summary.total_unread
        ),
    ];
    if roster.is_fully_staffed() {
        lines.push(format!("  {}", "fully staffed".green()));
    } else {
        lines.push(format!(
            "  {}",
            format!("{} unfilled", roster.unfilled_count()).yellow()
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Staff".underline()));
    for worker in &roster.workers {
        let name = worker
            .user
            .map_or_else(|| worker.worker_id.to_string(), |u| u.name.clone());
        let flag = match worker.action_type {
            Some(action) if action.is_urgent() => format!(" [{action}]").red().bold().to_string(),
            Some(action) => format!(" [{action}]").yellow().to_string(),
            None => String::new(),
        };
        let thread = worker
            .thread
            .map_or_else(String::new, |t| format!("  {}", t.id.to_string().cyan()));
        lines.push(format!(
            "  {}{}{}  {} shifts{}",
            name.bold(),
            flag,
            unread_badge(worker.unread_count()),
            worker.shifts.len(),
            thread
        ));
    }
    if !roster.unassigned.is_empty() {
        lines.push(format!("  {}", "Unassigned".yellow()));
        lines.extend(roster.unassigned.iter().copied().map(shift_line));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Broadcasts".underline()));
    let broadcasts = collect_broadcasts(store, booking_id);
    if broadcasts.is_empty() {
        lines.push("  none sent".dimmed().to_string());
    }
    for message in broadcasts {
        lines.push(format!(
            "  {}  {} - sent to {}",
            message.content,
            message.timestamp.dimmed(),
            roster.workers.len()
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", "Activity".underline()));
    let activity = collect_activity(store, booking_id);
    if activity.is_empty() {
        lines.push("  no activity".dimmed().to_string());
    }
    for item in activity {
        lines.push(format!(
            "  [{}] {}  {}",
            item.severity,
            item.title.bold(),
            item.timestamp.dimmed()
        ));
        if let Some(description) = &item.description {
            lines.push(format!("      {description}"));
        }
    }

    lines.join("\n")
}

/// A user's active and past conversations.
pub fn relationship(store: &EntityStore, rel: &Relationship<'_>, user_id: &str) -> String {
    let name = rel
        .user
        .map_or_else(|| user_id.to_string(), |u| u.name.clone());
    let mut lines = vec![format!("{}", name.bold())];
    if let Some(company) = rel.user.and_then(|u| u.company.as_deref()) {
        lines.push(format!("  {company}"));
    }

    for (label, entries) in [("Active", &rel.active), ("Past", &rel.past)] {
        lines.push(format!("{}", label.underline()));
        if entries.is_empty() {
            lines.push("  none".dimmed().to_string());
        }
        for entry in entries.iter() {
            let booking = store
                .booking(entry.thread.booking_id.as_str())
                .map_or("?", |b| b.title.as_str());
            lines.push(format!(
                "  {}  {}  {} shifts",
                entry.thread.id.to_string().cyan(),
                booking,
                entry.shifts.len()
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use crewline_inbox::{InboxFilter, InboxOptions, InboxScope};
    use crewline_store::Seed;

    use super::*;

    fn demo() -> EntityStore {
        colored::control::set_override(false);
        EntityStore::from_seed(Seed::demo(), "new")
    }

    #[test]
    fn staff_inbox_shows_threads_and_unread() {
        let store = demo();
        let out = staff_inbox(&store, "me");
        assert!(out.contains("t-me-george"));
        assert!(out.contains("George St - Concreting Phase"));
        assert!(out.contains("(1 unread)"));
        assert!(out.contains("Menu has been updated"));
        assert!(!out.contains("t-ben-george"));
    }

    #[test]
    fn chat_shows_context_and_actions() {
        let store = demo();
        let out = chat(&store, "t-charlie-george");
        assert!(out.contains("Steve Miller"));
        assert!(out.contains("s2-c"));
        assert!(out.contains("[SICK] Sick Report"));
        assert!(out.contains("[PENDING]"));
        assert!(out.contains("id: msg-action-charlie"));
        assert_eq!(chat(&store, "t-gone"), "no such thread: t-gone");
    }

    #[test]
    fn system_messages_render_without_sender() {
        let store = demo();
        let out = chat(&store, "t-me-george");
        assert!(out.contains("-- You have been assigned 3 shifts for George St. --"));
    }

    #[test]
    fn client_inbox_flags_urgent_booking() {
        let store = demo();
        let inbox = crewline_inbox::client_inbox(
            &store,
            InboxOptions {
                scope: InboxScope::All,
                filter: InboxFilter::All,
                client_id: "steve",
                system_booking_id: "booking-system",
            },
        );
        let out = client_inbox(&store, &inbox);
        assert!(out.contains("action: 2  unread: 2"));
        assert!(out.contains("George St - Concreting Phase [urgent]"));
        assert!(out.contains("Connect Support [action]"));
        assert!(!out.contains("booking-system "));
    }

    #[test]
    fn booking_detail_lists_roster_broadcasts_and_activity() {
        let store = demo();
        let out = booking_detail(&store, "booking-george");
        assert!(out.contains("14 shifts, 4 staff, 4 active, 3 unread"));
        assert!(out.contains("2 unfilled"));
        assert!(out.contains("Ben Smith [TIMESHEET]"));
        assert!(out.contains("s-open-1"));
        assert!(out.contains("none sent"));
        assert!(out.contains("[ERROR] Sick Report Filed"));

        let staff = out.find("Ben Smith").unwrap();
        let david = out.find("David Lee").unwrap();
        assert!(staff < david);
    }

    #[test]
    fn relationship_lists_active_threads() {
        let store = demo();
        let rel = crewline_inbox::relationship(&store, "steve");
        let out = relationship(&store, &rel, "steve");
        assert!(out.contains("Steve's Const"));
        assert!(out.contains("t-me-george"));
    }
}
