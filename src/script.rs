//! Scripted shell events for `teamdeck replay` and the interactive prompt
//!
//! A script is YAML:
//!
//! ```yaml
//! echo: true            # feed every navigation push back as a path change
//! events:
//!   - navigate: /acme/eng/calendar
//!   - tab: { action: toggle_split, id: calendar, direction: down }
//!   - enter_project: apollo
//!   - leave_project
//!   - switch_scope: { org: globex, division: sales }
//! ```

use crate::shell::ShellAction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Browser location changed
    Navigate(String),
    /// User tab action
    Tab(ShellAction),
    SwitchScope { org: String, division: String },
    SwitchDivision(String),
    EnterProject(String),
    LeaveProject,
    /// Print the current layout
    Show,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Simulate the router by echoing pushes back as path changes
    #[serde(default = "teamdeck_config::defaults::bool_true")]
    pub echo: bool,
    /// Events are written as single-key maps (`navigate: /calendar`) or bare
    /// names for unit events (`leave_project`)
    #[serde(default, with = "serde_yaml_ng::with::singleton_map_recursive")]
    pub events: Vec<ScriptEvent>,
}

impl ReplayScript {
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {:?}", path))?;
        let script: ReplayScript = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse replay script {:?}", path))?;
        log::info!("Loaded {} events from {:?}", script.events.len(), path);
        Ok(script)
    }
}

/// Parse one interactive line as a single event.
///
/// Accepts the YAML event syntax (`navigate: /calendar`) and a bare path
/// (`/calendar`) as shorthand for `navigate`.
pub fn parse_event_line(line: &str) -> Result<ScriptEvent> {
    let line = line.trim();
    if line.starts_with('/') {
        return Ok(ScriptEvent::Navigate(line.to_string()));
    }
    serde_yaml_ng::with::singleton_map_recursive::deserialize(serde_yaml_ng::Deserializer::from_str(
        line,
    ))
    .with_context(|| format!("Unrecognized event {:?}", line))
}
