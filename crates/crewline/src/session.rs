// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shell session state: the store, the mutation engine, and the open screen.
//!
//! Commands are parsed from input lines and executed against the session,
//! which returns the text to print. Nothing here touches the terminal.

use std::str::FromStr;

use crewline_config::CrewlineConfig;
use crewline_core::{Clock, CrewlineError, SystemClock};
use crewline_inbox::{
    InboxFilter, InboxOptions, InboxScope, MutationEngine, ScheduledReply, View, client_inbox,
    relationship,
};
use crewline_store::EntityStore;

use crate::render;

pub const HELP: &str = "\
commands:
  staff                 staff inbox
  client                client inbox
  scope <all|projects|system>
  filter <all|unread|action>
  open <thread>         open a chat
  booking <id>          open a booking
  send <text>           post into the open chat
  broadcast <text>      message every worker on the open booking
  resolve <message>     resolve a pending action
  profile <user>        someone's active and past threads
  show                  redraw the current screen
  back                  leave the current screen
  help                  this text
  quit                  exit";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Staff,
    Client,
    Scope(InboxScope),
    Filter(InboxFilter),
    Open(String),
    Booking(String),
    Send(String),
    Broadcast(String),
    Resolve(String),
    Profile(String),
    Show,
    Back,
    Help,
    Quit,
}

fn required(verb: &str, arg: &str, what: &str) -> Result<String, CrewlineError> {
    if arg.is_empty() {
        Err(CrewlineError::rejected(format!("usage: {verb} <{what}>")))
    } else {
        Ok(arg.to_string())
    }
}

impl FromStr for ShellCommand {
    type Err = CrewlineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim();

        match verb.to_ascii_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "client" => Ok(Self::Client),
            "scope" => InboxScope::from_str(arg)
                .map(Self::Scope)
                .map_err(|_| CrewlineError::rejected("usage: scope <all|projects|system>")),
            "filter" => InboxFilter::from_str(arg)
                .map(Self::Filter)
                .map_err(|_| CrewlineError::rejected("usage: filter <all|unread|action>")),
            "open" => required(verb, arg, "thread").map(Self::Open),
            "booking" => required(verb, arg, "id").map(Self::Booking),
            // Blank text is left for the mutation engine to reject.
            "send" => Ok(Self::Send(arg.to_string())),
            "broadcast" => Ok(Self::Broadcast(arg.to_string())),
            "resolve" => required(verb, arg, "message").map(Self::Resolve),
            "profile" => required(verb, arg, "user").map(Self::Profile),
            "show" | "ls" => Ok(Self::Show),
            "back" => Ok(Self::Back),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CrewlineError::rejected(format!(
                "unknown command `{other}`, try `help`"
            ))),
        }
    }
}

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Everything one shell run works on.
pub struct Session<C: Clock = SystemClock> {
    store: EntityStore,
    engine: MutationEngine<C>,
    view: View,
    scope: InboxScope,
    filter: InboxFilter,
    client_id: String,
    system_booking_id: String,
}

impl<C: Clock> Session<C> {
    pub fn new(store: EntityStore, engine: MutationEngine<C>, config: &CrewlineConfig) -> Self {
        Self {
            store,
            engine,
            view: View::default(),
            scope: InboxScope::default(),
            filter: InboxFilter::default(),
            client_id: config.persona.client_id.clone(),
            system_booking_id: config.inbox.system_booking_id.clone(),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Draw the current screen.
    pub fn render(&self) -> String {
        match &self.view {
            View::StaffInbox => render::staff_inbox(&self.store, self.engine.self_id().as_str()),
            View::StaffChat { thread_id } => render::chat(&self.store, thread_id.as_str()),
            View::ClientInbox => {
                let inbox = client_inbox(
                    &self.store,
                    InboxOptions {
                        scope: self.scope,
                        filter: self.filter,
                        client_id: &self.client_id,
                        system_booking_id: &self.system_booking_id,
                    },
                );
                render::client_inbox(&self.store, &inbox)
            }
            View::ClientBookingDetail { booking_id } => {
                render::booking_detail(&self.store, booking_id.as_str())
            }
        }
    }

    /// Switch screens. Leaving a chat cancels its scripted reply.
    fn navigate(&mut self, to: View) {
        let leaving = self
            .view
            .chat_thread()
            .filter(|open| to.chat_thread() != Some(*open));
        if let (Some(open), Some(scheduler)) = (leaving, self.engine.auto_reply()) {
            scheduler.cancel_thread(open.as_str());
        }
        self.view = to;
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<Outcome, CrewlineError> {
        match command {
            ShellCommand::Staff => self.navigate(View::StaffInbox),
            ShellCommand::Client => self.navigate(View::ClientInbox),
            ShellCommand::Scope(scope) => {
                self.scope = scope;
                self.navigate(View::ClientInbox);
            }
            ShellCommand::Filter(filter) => {
                self.filter = filter;
                self.navigate(View::ClientInbox);
            }
            ShellCommand::Open(thread_id) => {
                let Some(thread) = self.store.thread(&thread_id) else {
                    return Ok(Outcome::Print(format!("no such thread: {thread_id}")));
                };
                let thread_id = thread.id.clone();
                self.navigate(View::StaffChat { thread_id });
            }
            ShellCommand::Booking(booking_id) => {
                let Some(booking) = self.store.booking(&booking_id) else {
                    return Ok(Outcome::Print(format!("no such booking: {booking_id}")));
                };
                let booking_id = booking.id.clone();
                self.navigate(View::ClientBookingDetail { booking_id });
            }
            ShellCommand::Send(text) => {
                let Some(thread_id) = self.view.chat_thread().cloned() else {
                    return Err(CrewlineError::rejected("open a chat before sending"));
                };
                let self_id = self.engine.self_id().clone();
                self.engine.send_message(
                    &mut self.store,
                    thread_id.as_str(),
                    self_id.as_str(),
                    &text,
                )?;
            }
            ShellCommand::Broadcast(text) => {
                let Some(booking_id) = self.view.detail_booking().cloned() else {
                    return Err(CrewlineError::rejected("open a booking before broadcasting"));
                };
                let receipt = self
                    .engine
                    .broadcast(&mut self.store, booking_id.as_str(), &text)?;
                return Ok(Outcome::Print(format!(
                    "{}\n\nBroadcast sent to {} workers.",
                    self.render(),
                    receipt.recipient_count()
                )));
            }
            ShellCommand::Resolve(message_id) => {
                if self
                    .engine
                    .resolve_action(&mut self.store, &message_id)
                    .is_none()
                {
                    return Ok(Outcome::Print(format!("no such message: {message_id}")));
                }
            }
            ShellCommand::Profile(user_id) => {
                let rel = relationship(&self.store, &user_id);
                return Ok(Outcome::Print(render::relationship(
                    &self.store,
                    &rel,
                    &user_id,
                )));
            }
            ShellCommand::Show => {}
            ShellCommand::Back => {
                let back = self.view.back();
                self.navigate(back);
            }
            ShellCommand::Help => return Ok(Outcome::Print(HELP.to_string())),
            ShellCommand::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Print(self.render()))
    }

    /// Apply a scripted reply that has come due.
    ///
    /// Returns the redrawn chat if the reply landed in the open one, or a
    /// one-line notice otherwise.
    pub fn deliver(&mut self, reply: ScheduledReply) -> Option<String> {
        let message = self.engine.apply_reply(&mut self.store, reply)?;
        if self.view.chat_thread() == Some(&message.thread_id) {
            return Some(self.render());
        }
        let sender = self
            .store
            .user(message.sender_id.as_str())
            .map_or_else(|| message.sender_id.to_string(), |u| u.name.clone());
        Some(format!("new message from {sender} in {}", message.thread_id))
    }

    /// Cancel every outstanding scripted reply.
    pub fn shutdown(&self) {
        if let Some(scheduler) = self.engine.auto_reply() {
            scheduler.cancel_all();
        }
    }
}
