//! Persisted study settings
//!
//! The daily plan (new/review limits and ordering) lives as JSON in the
//! platform config directory so it survives between sittings.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use lexmem_core::StudyConfig;
use tracing::debug;

fn settings_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "lexmem", "lexmem")
        .context("could not determine project directories")?;
    Ok(proj_dirs.config_dir().join("study_settings.json"))
}

/// Load the saved study settings, falling back to defaults.
pub fn load_settings() -> StudyConfig {
    let Ok(path) = settings_path() else {
        return StudyConfig::default();
    };
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring malformed settings");
                StudyConfig::default()
            }
        },
        Err(_) => StudyConfig::default(),
    }
}

/// Persist the study settings.
pub fn save_settings(config: &StudyConfig) -> Result<()> {
    let path = settings_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let raw = serde_json::to_string_pretty(config)?;
    fs::write(&path, raw).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "settings saved");
    Ok(())
}
