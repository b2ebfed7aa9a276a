//! Shell session runtime used by the binary
//!
//! Wires config, org directory and saved session into a `ShellController`,
//! feeds it events (from a replay script or stdin), and saves the session on
//! shutdown.

use crate::cli::RuntimeOptions;
use crate::scope::{OrgDirectory, ScopeContext, ScopeError, UnrestrictedOnly};
use crate::script::{ReplayScript, ScriptEvent, parse_event_line};
use crate::session::{SessionState, capture, restore, storage};
use crate::shell::{RecordingNavigator, ShellController, ShellLayout};
use crate::tab::TabManager;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use teamdeck_config::Config;

/// What applying one event did
#[derive(Debug)]
pub enum EventOutcome {
    /// Navigations pushed while handling the event (already echoed when enabled)
    Applied { pushed: Vec<String> },
    /// Scope change refused; nothing changed
    Rejected(ScopeError),
    Layout(ShellLayout),
}

pub struct App {
    config: Config,
    shell: ShellController<RecordingNavigator>,
    /// Feed every push back into the controller, standing in for the router
    echo: bool,
    /// `None` disables session persistence
    session_file: Option<PathBuf>,
}

impl App {
    /// Load config, org directory and saved session as described by `options`
    pub fn new(options: &RuntimeOptions) -> Result<Self> {
        let config_file = options.config_file();
        let config = Config::load_from(&config_file)
            .with_context(|| format!("Failed to load config from {:?}", config_file))?;

        if options.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
            crate::debug::init_log_bridge(Some(config.log_level.to_level_filter()));
        }

        let config_dir = config_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(Config::config_dir);
        let directory_file = options
            .directory_path
            .clone()
            .or_else(|| config.directory_path_in(&config_dir));
        let directory = match directory_file {
            Some(path) => OrgDirectory::load_from(&path)?,
            None => {
                debug_info!("APP", "No org directory configured, using fallback");
                OrgDirectory::fallback()
            }
        };

        let session_file = (!options.no_session).then(|| options.session_file());
        let session = match &session_file {
            Some(path) if config.restore_session => match storage::load_session_from(path) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("Ignoring unreadable session: {:#}", e);
                    None
                }
            },
            _ => None,
        };

        Self::from_parts(config, directory, session, session_file)
    }

    /// Build an app from already-loaded parts
    pub fn from_parts(
        config: Config,
        directory: OrgDirectory,
        session: Option<SessionState>,
        session_file: Option<PathBuf>,
    ) -> Result<Self> {
        let (tabs, scope) = match &session {
            Some(state) => (
                restore::restore_tabs(state, config.default_split_direction),
                restore::restore_scope(state, directory, UnrestrictedOnly)
                    .context("Failed to resolve scope")?,
            ),
            None => (
                TabManager::with_split_direction(config.default_split_direction),
                ScopeContext::resolve(directory, UnrestrictedOnly, None)
                    .context("Failed to resolve scope")?,
            ),
        };

        let shell = ShellController::new(tabs, scope, RecordingNavigator::new())
            .with_default_path(&config.default_path);
        let mut app = Self {
            config,
            shell,
            echo: true,
            session_file,
        };

        // The router starts out on the active tab, or on the default path
        let start = app
            .shell
            .tabs()
            .active_tab()
            .map(|t| t.path.clone())
            .unwrap_or_else(|| app.config.default_path.clone());
        let href = app.shell.scope().href(&start);
        app.shell.handle_path_change(&href);
        Ok(app)
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    pub fn shell(&self) -> &ShellController<RecordingNavigator> {
        &self.shell
    }

    pub fn layout(&self) -> ShellLayout {
        self.shell.layout()
    }

    /// Apply one event to the controller
    pub fn apply(&mut self, event: &ScriptEvent) -> EventOutcome {
        let result = match event {
            ScriptEvent::Navigate(href) => {
                self.shell.handle_path_change(href);
                Ok(())
            }
            ScriptEvent::Tab(action) => {
                self.shell.dispatch(action.clone());
                Ok(())
            }
            ScriptEvent::SwitchScope { org, division } => self.shell.switch_scope(org, division),
            ScriptEvent::SwitchDivision(division) => self.shell.switch_division(division),
            ScriptEvent::EnterProject(project) => self.shell.enter_project(project),
            ScriptEvent::LeaveProject => {
                self.shell.leave_project();
                Ok(())
            }
            ScriptEvent::Show => return EventOutcome::Layout(self.layout()),
        };

        let pushed = self.shell.navigator_mut().take();
        if self.echo {
            for href in &pushed {
                self.shell.handle_path_change(href);
            }
        }
        match result {
            Ok(()) => EventOutcome::Applied { pushed },
            Err(e) => EventOutcome::Rejected(e),
        }
    }

    /// Run every event of a script, reporting to `out`, then print the
    /// final layout as text or JSON
    pub fn run_script(
        &mut self,
        script: &ReplayScript,
        json: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        self.echo = script.echo;
        for (i, event) in script.events.iter().enumerate() {
            let outcome = self.apply(event);
            write_outcome(out, Some(i + 1), &outcome)?;
        }
        if json {
            let layout = serde_json::to_string_pretty(&self.layout())
                .context("Failed to serialize layout")?;
            writeln!(out, "{}", layout)?;
        } else {
            write!(out, "{}", self.layout())?;
        }
        Ok(())
    }

    /// Read events line by line until EOF
    pub fn run_interactive(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", self.layout())?;
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            match parse_event_line(&line) {
                Ok(event) => {
                    let outcome = self.apply(&event);
                    write_outcome(out, None, &outcome)?;
                }
                Err(e) => writeln!(out, "! {e:#}")?,
            }
        }
        Ok(())
    }

    /// Save the session if configured
    pub fn shutdown(self) -> Result<()> {
        if let Some(path) = &self.session_file
            && self.config.save_session_on_exit
        {
            let state = capture::capture_session(self.shell.tabs(), self.shell.scope());
            storage::save_session_to(&state, path)?;
        }
        log::info!("Shell session ended");
        Ok(())
    }
}

fn write_outcome(out: &mut impl Write, step: Option<usize>, outcome: &EventOutcome) -> Result<()> {
    let prefix = step.map(|n| format!("{n:>3} ")).unwrap_or_default();
    match outcome {
        EventOutcome::Applied { pushed } => {
            for href in pushed {
                writeln!(out, "{prefix}-> {href}")?;
            }
        }
        EventOutcome::Rejected(e) => writeln!(out, "{prefix}! {e}")?,
        EventOutcome::Layout(layout) => write!(out, "{layout}")?,
    }
    Ok(())
}
