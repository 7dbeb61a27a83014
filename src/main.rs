//! Focus timer CLI - a terminal focus timer with a background daemon.
//!
//! The daemon owns the countdown and cycles work segments and breaks:
//! - 25 minutes of focused work (default)
//! - 5 minutes of short break
//! - 15 minutes of long break every 4 work segments

use anyhow::Result;
use clap::{CommandFactory, Parser};

use focustimer::cli::{Cli, Commands, ConfigArgs, Display, IpcClient};
use focustimer::daemon::{runtime, DaemonOptions};
use focustimer::settings::SettingsStore;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let profile = resolve_profile(cli.profile.clone());

    match cli.command {
        Some(Commands::Start) => {
            let client = IpcClient::new()?;
            let response = client.start().await?;
            Display::show_start_success(&response);
        }
        Some(Commands::Pause) => {
            let client = IpcClient::new()?;
            let response = client.pause().await?;
            Display::show_pause_success(&response);
        }
        Some(Commands::Reset) => {
            let client = IpcClient::new()?;
            let response = client.reset().await?;
            Display::show_reset_success(&response);
        }
        Some(Commands::Distraction) => {
            let client = IpcClient::new()?;
            let response = client.distraction().await?;
            Display::show_distraction(&response);
        }
        Some(Commands::Status(args)) => {
            let client = IpcClient::new()?;
            let response = client.status().await?;
            if args.compact {
                Display::show_status_compact(&response);
            } else {
                Display::show_status(&response);
            }
        }
        Some(Commands::Config(args)) => {
            handle_config(&profile, args).await?;
        }
        Some(Commands::Daemon(args)) => {
            runtime::run(DaemonOptions {
                profile,
                socket_path: args.socket,
                api_base: args.api_base,
            })
            .await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Shows or updates the stored configuration for a profile.
async fn handle_config(profile: &str, args: ConfigArgs) -> Result<()> {
    let store = SettingsStore::default_location()?;

    if args.is_empty() {
        Display::show_config(profile, &store.load(profile));
        return Ok(());
    }

    let params = args.to_params();
    let merged = params.apply_to(&store.load(profile));
    if let Err(message) = merged.validate() {
        anyhow::bail!(message);
    }

    // Full overwrite; the store has no partial-merge semantics
    store.save(profile, &merged)?;

    // Best-effort: apply to a running daemon
    let (applied, note) = match IpcClient::new() {
        Ok(client) => match client.configure(&params).await {
            Ok(_) => (true, None),
            Err(e) => (false, Some(e.to_string())),
        },
        Err(e) => (false, Some(e.to_string())),
    };

    Display::show_config_saved(applied, note.as_deref());
    Display::show_config(profile, &merged);

    Ok(())
}

/// Resolves the profile name from the flag, the environment, or a default.
fn resolve_profile(profile: Option<String>) -> String {
    profile
        .or_else(|| std::env::var("USER").ok())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "default".to_string())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["focustimer"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["focustimer", "status"]);
        assert!(matches!(cli.command, Some(Commands::Status(_))));
    }

    #[test]
    fn test_cli_parse_start() {
        let cli = Cli::parse_from(["focustimer", "start"]);
        assert!(matches!(cli.command, Some(Commands::Start)));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["focustimer", "--verbose", "status"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_resolve_profile_explicit() {
        assert_eq!(resolve_profile(Some("alice".to_string())), "alice");
    }

    #[test]
    fn test_resolve_profile_fallback_never_empty() {
        let profile = resolve_profile(None);
        assert!(!profile.is_empty());
    }
}
