//! File I/O for session persistence
//!
//! Sessions are stored in `~/.config/teamdeck/session.yaml`

use super::SessionState;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use teamdeck_config::Config;

/// Get the path to the session state file
pub fn session_path() -> PathBuf {
    Config::config_dir().join("session.yaml")
}

/// Save session state to a specific file
pub fn save_session_to(state: &SessionState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }

    let contents = serde_yaml_ng::to_string(state).context("Failed to serialize session state")?;

    let temp_path = path.with_extension("yaml.tmp");
    std::fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write session state to {:?}", temp_path))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move session state into {:?}", path))?;

    log::info!(
        "Saved session state ({} tabs) to {:?}",
        state.tabs.len(),
        path
    );
    Ok(())
}

/// Load session state from a specific file
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt.
pub fn load_session_from(path: &Path) -> Result<Option<SessionState>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session state from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let state: SessionState = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse session state from {:?}", path))?;

    log::info!(
        "Loaded session state ({} tabs) from {:?}",
        state.tabs.len(),
        path
    );
    Ok(Some(state))
}

/// Remove the session state file. Returns true if a file was removed.
pub fn clear_session_at(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)
        .with_context(|| format!("Failed to remove session state file {:?}", path))?;
    Ok(true)
}
