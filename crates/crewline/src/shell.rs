// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `crewline shell` command implementation.
//!
//! Runs an interactive REPL over one in-memory store. Line editing happens
//! on a blocking thread so scripted replies can land while the prompt waits.

use std::sync::mpsc as std_mpsc;

use colored::Colorize;
use crewline_config::CrewlineConfig;
use crewline_core::CrewlineError;
use crewline_inbox::{AutoReplyScheduler, MutationEngine};
use crewline_store::EntityStore;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::session::{Outcome, Session, ShellCommand};

/// Hand the reader its next prompt. False once the reader has gone.
fn ask(prompts: &std_mpsc::Sender<String>, session: &Session) -> bool {
    prompts
        .send(format!("{}> ", session.view().to_string().green()))
        .is_ok()
}

/// Read lines on a blocking thread, one per prompt received.
///
/// Exits once the prompt sender is dropped or the line receiver closes.
fn read_lines(
    prompts: std_mpsc::Receiver<String>,
    lines: mpsc::Sender<Result<String, ReadlineError>>,
) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            let _ = lines.blocking_send(Err(e));
            return;
        }
    };
    while let Ok(prompt) = prompts.recv() {
        let line = rl.readline(&prompt);
        if let Ok(text) = &line {
            if !text.trim().is_empty() {
                let _ = rl.add_history_entry(text.as_str());
            }
        }
        if lines.blocking_send(line).is_err() {
            break;
        }
    }
}

/// Runs the `crewline shell` interactive REPL.
pub async fn run_shell(config: CrewlineConfig, store: EntityStore) -> Result<(), CrewlineError> {
    let (scheduler, mut replies) = AutoReplyScheduler::new(&config.auto_reply);
    let engine =
        MutationEngine::with_system_clock(config.persona.self_id.clone()).with_auto_reply(scheduler);
    let mut session = Session::new(store, engine, &config);

    let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();
    let (line_tx, mut lines) = mpsc::channel(1);
    let reader = tokio::task::spawn_blocking(move || read_lines(prompt_rx, line_tx));

    println!("{}", "crewline shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());
    println!("{}\n", session.render());
    info!(
        self_id = %config.persona.self_id,
        auto_reply = config.auto_reply.enabled,
        "shell started"
    );

    let mut failure = None;
    let mut open = ask(&prompt_tx, &session);

    while open {
        tokio::select! {
            line = lines.recv() => {
                let line = match line {
                    Some(Ok(line)) => line,
                    Some(Err(ReadlineError::Interrupted | ReadlineError::Eof)) | None => break,
                    Some(Err(e)) => {
                        failure = Some(CrewlineError::Internal(format!("readline failed: {e}")));
                        break;
                    }
                };
                if !line.trim().is_empty() {
                    match line.parse::<ShellCommand>().and_then(|cmd| session.execute(cmd)) {
                        Ok(Outcome::Print(text)) => println!("{text}\n"),
                        Ok(Outcome::Quit) => break,
                        Err(e) => eprintln!("{}: {e}\n", "error".red()),
                    }
                }
                open = ask(&prompt_tx, &session);
            }
            Some(reply) = replies.recv() => {
                debug!(thread_id = %reply.thread_id, "scripted reply due");
                if let Some(text) = session.deliver(reply) {
                    println!("\n{text}\n");
                }
            }
        }
    }

    session.shutdown();
    drop(prompt_tx);
    let _ = reader.await;
    if let Some(e) = failure {
        return Err(e);
    }
    println!("{}", "goodbye".dimmed());
    Ok(())
}
