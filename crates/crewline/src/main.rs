// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crewline binary entry point.
//!
//! Loads configuration and the seed snapshot, then either prints one screen
//! or starts the interactive shell.

mod render;
mod session;
mod shell;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use crewline_config::CrewlineConfig;
use crewline_core::CrewlineError;
use crewline_inbox::{InboxFilter, InboxOptions, InboxScope, Persona, client_inbox};
use crewline_store::{EntityStore, Seed};
use tracing::info;

/// Crewline - staffing inbox for crews and their clients.
#[derive(Parser, Debug)]
#[command(name = "crewline", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an inbox and exit.
    Inbox {
        /// Whose inbox to print.
        #[arg(long, default_value = "staff")]
        persona: Persona,
        /// Client inbox tab: all, projects or system.
        #[arg(long, default_value = "all")]
        scope: InboxScope,
        /// Client inbox filter: all, unread or action.
        #[arg(long, default_value = "all")]
        filter: InboxFilter,
    },
    /// Print one booking's roster, broadcasts, and activity.
    Booking {
        /// Booking identifier.
        id: String,
    },
    /// Print the active seed snapshot as JSON.
    Seed,
    /// Print the effective configuration as TOML.
    Config,
    /// Launch the interactive shell (the default).
    Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => crewline_config::load_and_validate_path(path),
        None => crewline_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            crewline_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    if let Err(e) = run(cli.command, config).await {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn run(command: Option<Commands>, config: CrewlineConfig) -> Result<(), CrewlineError> {
    let seed = load_seed(&config)?;

    match command {
        Some(Commands::Seed) => println!("{}", seed.to_json_pretty()?),
        Some(Commands::Config) => {
            let text = toml::to_string_pretty(&config)
                .map_err(|e| CrewlineError::Internal(format!("cannot render config: {e}")))?;
            print!("{text}");
        }
        Some(Commands::Inbox {
            persona,
            scope,
            filter,
        }) => {
            let store = EntityStore::from_seed(seed, &config.ids.prefix);
            println!("{}", inbox_screen(&store, &config, persona, scope, filter));
        }
        Some(Commands::Booking { id }) => {
            let store = EntityStore::from_seed(seed, &config.ids.prefix);
            if store.booking(&id).is_none() {
                return Err(CrewlineError::rejected(format!("no such booking: {id}")));
            }
            println!("{}", render::booking_detail(&store, &id));
        }
        Some(Commands::Shell) | None => {
            let store = EntityStore::from_seed(seed, &config.ids.prefix);
            shell::run_shell(config, store).await?;
        }
    }
    Ok(())
}

/// The configured seed file, or the built-in demo data.
fn load_seed(config: &CrewlineConfig) -> Result<Seed, CrewlineError> {
    match &config.seed.path {
        Some(path) => {
            info!(path = %path, "loading seed file");
            Seed::from_path(Path::new(path))
        }
        None => Ok(Seed::demo()),
    }
}

fn inbox_screen(
    store: &EntityStore,
    config: &CrewlineConfig,
    persona: Persona,
    scope: InboxScope,
    filter: InboxFilter,
) -> String {
    match persona {
        Persona::Staff => render::staff_inbox(store, &config.persona.self_id),
        Persona::Client => {
            let inbox = client_inbox(
                store,
                InboxOptions {
                    scope,
                    filter,
                    client_id: &config.persona.client_id,
                    system_booking_id: &config.inbox.system_booking_id,
                },
            );
            render::client_inbox(store, &inbox)
        }
    }
}

/// Logs go to stderr so printed screens and JSON stay clean on stdout.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crewline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use crewline_test_utils::test_config;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn inbox_flags_parse_case_insensitively() {
        let cli = Cli::parse_from([
            "crewline", "inbox", "--persona", "Client", "--scope", "projects", "--filter", "ACTION",
        ]);
        match cli.command {
            Some(Commands::Inbox {
                persona,
                scope,
                filter,
            }) => {
                assert_eq!(persona, Persona::Client);
                assert_eq!(scope, InboxScope::Projects);
                assert_eq!(filter, InboxFilter::Action);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = crewline_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.persona.self_id, "me");
        assert!(config.seed.path.is_none());
    }

    #[test]
    fn default_config_prints_as_toml() {
        let text = toml::to_string_pretty(&test_config()).unwrap();
        assert!(text.contains("[persona]"));
        assert!(text.contains("self_id = \"me\""));
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let mut config = test_config();
        config.seed.path = Some("/nonexistent/crewline-seed.json".into());
        let err = load_seed(&config).unwrap_err();
        assert!(matches!(err, CrewlineError::Seed { .. }));
    }

    #[test]
    fn client_inbox_screen_hides_the_system_booking() {
        colored::control::set_override(false);
        let config = test_config();
        let store = EntityStore::from_seed(Seed::demo(), &config.ids.prefix);
        let out = inbox_screen(
            &store,
            &config,
            Persona::Client,
            InboxScope::All,
            InboxFilter::All,
        );
        assert!(out.contains("booking-george"));
        assert!(!out.contains("booking-system"));
        assert!(out.contains("action: 2"));
    }
}
