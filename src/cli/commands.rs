//! Command definitions for the focus timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::ConfigureParams;

/// Default backend API base URL.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:4000/api";

// ============================================================================
// CLI Structure
// ============================================================================

/// Focus session timer with a background daemon
#[derive(Parser, Debug)]
#[command(
    name = "focustimer",
    version,
    about = "Focus session timer with a background daemon",
    long_about = "A terminal focus timer cycling work segments and breaks.\n\
                  Sessions and focus minutes are reported to a backend for\n\
                  stats; the countdown itself never depends on it.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Profile to operate on (defaults to $USER)
    #[arg(long, global = true)]
    pub profile: Option<String>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start or resume the countdown
    Start,

    /// Pause the countdown
    Pause,

    /// Reset the current segment to its full duration
    Reset,

    /// Log a distraction during the current work segment
    Distraction,

    /// Show the current timer status
    Status(StatusArgs),

    /// Show or change the timer configuration
    Config(ConfigArgs),

    /// Run the background daemon
    #[command(hide = true)]
    Daemon(DaemonArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Status Command Arguments
// ============================================================================

/// Arguments for the status command
#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {
    /// Print a compact one-line readout
    #[arg(short, long)]
    pub compact: bool,
}

// ============================================================================
// Config Command Arguments
// ============================================================================

/// Arguments for the config command.
///
/// With no flags the stored configuration is shown; any flag saves the
/// merged configuration and applies it to a running daemon when possible.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Work duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Short break duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub short_break: Option<u32>,

    /// Long break duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break: Option<u32>,

    /// Work segments between long breaks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub sessions_until_long_break: Option<u32>,

    /// Automatically start breaks (true/false)
    #[arg(long)]
    pub auto_start_breaks: Option<bool>,

    /// Automatically start work segments (true/false)
    #[arg(long)]
    pub auto_start_work: Option<bool>,

    /// Play the completion chime (true/false)
    #[arg(long)]
    pub sound: Option<bool>,
}

impl ConfigArgs {
    /// Returns true if no setter flag was given.
    pub fn is_empty(&self) -> bool {
        self.work.is_none()
            && self.short_break.is_none()
            && self.long_break.is_none()
            && self.sessions_until_long_break.is_none()
            && self.auto_start_breaks.is_none()
            && self.auto_start_work.is_none()
            && self.sound.is_none()
    }

    /// Converts the setter flags into configure parameters.
    pub fn to_params(&self) -> ConfigureParams {
        ConfigureParams {
            work_minutes: self.work,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            sessions_until_long_break: self.sessions_until_long_break,
            auto_start_breaks: self.auto_start_breaks,
            auto_start_work: self.auto_start_work,
            sound_enabled: self.sound,
        }
    }
}

// ============================================================================
// Daemon Command Arguments
// ============================================================================

/// Arguments for the daemon command
#[derive(Args, Debug, Clone)]
pub struct DaemonArgs {
    /// Socket path override
    #[arg(long)]
    pub socket: Option<PathBuf>,

    /// Base URL of the backend API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["focustimer"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(cli.profile.is_none());
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["focustimer", "--verbose"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_profile() {
            let cli = Cli::parse_from(["focustimer", "--profile", "alice", "status"]);
            assert_eq!(cli.profile, Some("alice".to_string()));
        }

        #[test]
        fn test_parse_simple_commands() {
            assert!(matches!(
                Cli::parse_from(["focustimer", "start"]).command,
                Some(Commands::Start)
            ));
            assert!(matches!(
                Cli::parse_from(["focustimer", "pause"]).command,
                Some(Commands::Pause)
            ));
            assert!(matches!(
                Cli::parse_from(["focustimer", "reset"]).command,
                Some(Commands::Reset)
            ));
            assert!(matches!(
                Cli::parse_from(["focustimer", "distraction"]).command,
                Some(Commands::Distraction)
            ));
        }

        #[test]
        fn test_parse_status() {
            let cli = Cli::parse_from(["focustimer", "status"]);
            match cli.command {
                Some(Commands::Status(args)) => assert!(!args.compact),
                _ => panic!("Expected Status command"),
            }
        }

        #[test]
        fn test_parse_status_compact() {
            let cli = Cli::parse_from(["focustimer", "status", "--compact"]);
            match cli.command {
                Some(Commands::Status(args)) => assert!(args.compact),
                _ => panic!("Expected Status command"),
            }
        }

        #[test]
        fn test_parse_daemon_defaults() {
            let cli = Cli::parse_from(["focustimer", "daemon"]);
            match cli.command {
                Some(Commands::Daemon(args)) => {
                    assert!(args.socket.is_none());
                    assert_eq!(args.api_base, DEFAULT_API_BASE);
                }
                _ => panic!("Expected Daemon command"),
            }
        }

        #[test]
        fn test_parse_daemon_overrides() {
            let cli = Cli::parse_from([
                "focustimer",
                "daemon",
                "--socket",
                "/tmp/ft.sock",
                "--api-base",
                "http://example.com/api",
            ]);
            match cli.command {
                Some(Commands::Daemon(args)) => {
                    assert_eq!(args.socket, Some(PathBuf::from("/tmp/ft.sock")));
                    assert_eq!(args.api_base, "http://example.com/api");
                }
                _ => panic!("Expected Daemon command"),
            }
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["focustimer", "completions", "zsh"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Zsh);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Config Command Tests
    // ------------------------------------------------------------------------

    mod config_args_tests {
        use super::*;

        #[test]
        fn test_parse_config_no_flags_is_empty() {
            let cli = Cli::parse_from(["focustimer", "config"]);
            match cli.command {
                Some(Commands::Config(args)) => assert!(args.is_empty()),
                _ => panic!("Expected Config command"),
            }
        }

        #[test]
        fn test_parse_config_durations() {
            let cli = Cli::parse_from([
                "focustimer",
                "config",
                "--work",
                "50",
                "--short-break",
                "10",
                "--long-break",
                "30",
                "--sessions-until-long-break",
                "2",
            ]);
            match cli.command {
                Some(Commands::Config(args)) => {
                    assert_eq!(args.work, Some(50));
                    assert_eq!(args.short_break, Some(10));
                    assert_eq!(args.long_break, Some(30));
                    assert_eq!(args.sessions_until_long_break, Some(2));
                    assert!(!args.is_empty());
                }
                _ => panic!("Expected Config command"),
            }
        }

        #[test]
        fn test_parse_config_flags() {
            let cli = Cli::parse_from([
                "focustimer",
                "config",
                "--auto-start-breaks",
                "true",
                "--auto-start-work",
                "false",
                "--sound",
                "false",
            ]);
            match cli.command {
                Some(Commands::Config(args)) => {
                    assert_eq!(args.auto_start_breaks, Some(true));
                    assert_eq!(args.auto_start_work, Some(false));
                    assert_eq!(args.sound, Some(false));
                }
                _ => panic!("Expected Config command"),
            }
        }

        #[test]
        fn test_config_args_to_params() {
            let args = ConfigArgs {
                work: Some(45),
                sound: Some(false),
                ..Default::default()
            };
            let params = args.to_params();

            assert_eq!(params.work_minutes, Some(45));
            assert_eq!(params.sound_enabled, Some(false));
            assert!(params.short_break_minutes.is_none());
            assert!(params.auto_start_breaks.is_none());
        }
    }

    // ------------------------------------------------------------------------
    // Error Case Tests (using try_parse)
    // ------------------------------------------------------------------------

    mod error_tests {
        use super::*;

        #[test]
        fn test_parse_config_work_zero() {
            let result = Cli::try_parse_from(["focustimer", "config", "--work", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_config_work_not_number() {
            let result = Cli::try_parse_from(["focustimer", "config", "--work", "abc"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_config_sessions_zero() {
            let result = Cli::try_parse_from([
                "focustimer",
                "config",
                "--sessions-until-long-break",
                "0",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_config_bool_invalid() {
            let result =
                Cli::try_parse_from(["focustimer", "config", "--sound", "maybe"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_unknown_command() {
            let result = Cli::try_parse_from(["focustimer", "unknown"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_completions_invalid_shell() {
            let result = Cli::try_parse_from(["focustimer", "completions", "invalid"]);
            assert!(result.is_err());
        }
    }
}
