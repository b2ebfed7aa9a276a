//! Command-line interface for teamdeck.
//!
//! This module handles CLI argument parsing and the subcommands that finish
//! without starting a shell session (`classify`, `session`).

use crate::route::{classify, normalize_path};
use crate::session::storage;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use teamdeck_config::Config;

/// teamdeck - workspace tab and navigation state manager
#[derive(Parser)]
#[command(name = "teamdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/teamdeck/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Organization directory YAML (overrides `directory_file` in the config)
    #[arg(long, global = true, value_name = "FILE")]
    pub directory: Option<PathBuf>,

    /// Debug log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_level)]
    pub log_level: Option<LevelFilter>,

    /// Neither restore nor save the session blob
    #[arg(long, global = true)]
    pub no_session: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the tab title and kind for each path
    Classify {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<String>,
    },
    /// Drive a shell session from a YAML event script and print the result
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Print the final layout as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Inspect or remove the saved session
    Session {
        #[command(subcommand)]
        action: SessionCommand,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Print the saved session YAML
    Show,
    /// Delete the saved session
    Clear,
}

/// How the shell session is driven once started
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Read one event per line from stdin
    #[default]
    Interactive,
    Replay { script: PathBuf, json: bool },
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub directory_path: Option<PathBuf>,
    /// Log level from `--log-level` (takes precedence over RUST_LOG and config)
    pub log_level: Option<LevelFilter>,
    pub no_session: bool,
    pub mode: RunMode,
}

impl RuntimeOptions {
    /// Config file in effect
    pub fn config_file(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(Config::config_path)
    }

    /// Session file that lives next to the config file in effect
    pub fn session_file(&self) -> PathBuf {
        match &self.config_path {
            Some(path) => path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("session.yaml"),
            None => storage::session_path(),
        }
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Start a shell session with these options
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();
    let mut options = RuntimeOptions {
        config_path: cli.config,
        directory_path: cli.directory,
        log_level: cli.log_level,
        no_session: cli.no_session,
        mode: RunMode::Interactive,
    };

    match cli.command {
        Some(Commands::Classify { paths }) => {
            for line in classify_lines(&paths) {
                println!("{}", line);
            }
            CliResult::Exit(0)
        }
        Some(Commands::Session { action }) => {
            let path = options.session_file();
            let result = match action {
                SessionCommand::Show => show_session(&path),
                SessionCommand::Clear => clear_session(&path),
            };
            match result {
                Ok(()) => CliResult::Exit(0),
                Err(e) => {
                    eprintln!("teamdeck: error: {e:#}");
                    CliResult::Exit(1)
                }
            }
        }
        Some(Commands::Replay { script, json }) => {
            options.mode = RunMode::Replay { script, json };
            CliResult::Continue(options)
        }
        None => CliResult::Continue(options),
    }
}

/// One `path<TAB>title<TAB>kind` line per input path
pub fn classify_lines(paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|raw| {
            let path = normalize_path(raw);
            let c = classify(&path);
            format!("{}\t{}\t{}", path, c.title, c.kind)
        })
        .collect()
}

fn show_session(path: &Path) -> anyhow::Result<()> {
    match storage::load_session_from(path)? {
        Some(state) => print!("{}", serde_yaml_ng::to_string(&state)?),
        None => println!("No saved session at {}", path.display()),
    }
    Ok(())
}

fn clear_session(path: &Path) -> anyhow::Result<()> {
    if storage::clear_session_at(path)? {
        println!("Removed {}", path.display());
    } else {
        println!("No saved session at {}", path.display());
    }
    Ok(())
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>()
        .map_err(|_| format!("invalid log level '{s}' (expected off, error, warn, info, debug or trace)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replay_with_global_flags() {
        let cli = Cli::try_parse_from([
            "teamdeck",
            "replay",
            "script.yaml",
            "--log-level",
            "debug",
            "--no-session",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Replay { .. })));
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));
        assert!(cli.no_session);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        assert!(Cli::try_parse_from(["teamdeck", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_classify_lines() {
        let lines = classify_lines(&["/c/general".to_string(), "".to_string()]);
        assert_eq!(lines, vec!["/c/general\t#General\tchannel", "/dashboard\tDashboard\tproject"]);
    }

    #[test]
    fn test_session_file_follows_config() {
        let options = RuntimeOptions {
            config_path: Some(PathBuf::from("/tmp/td/config.yaml")),
            ..RuntimeOptions::default()
        };
        assert_eq!(options.session_file(), PathBuf::from("/tmp/td/session.yaml"));
        assert_eq!(options.config_file(), PathBuf::from("/tmp/td/config.yaml"));
    }
}
