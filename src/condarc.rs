//! condarc file model
//!
//! Minimal view of a conda configuration file: only the `channels` list is
//! modeled, which is all channel-ensuring needs. Unknown keys in an
//! existing condarc are not preserved, which is acceptable because the
//! condarc written here is an override file owned by this tooling, not the
//! user's own `~/.condarc`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parsed condarc contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Condarc {
    #[serde(default)]
    pub channels: Vec<String>,
}

impl Condarc {
    /// Load a condarc from disk. A missing file loads as the default
    /// (empty) configuration; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Condarc::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write the condarc to disk as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Append any channels not already configured, preserving the order of
    /// existing channels. Returns whether the configuration changed.
    pub fn ensure_channels(&mut self, channels: &[String]) -> bool {
        let mut changed = false;
        for channel in channels {
            if !self.channels.contains(channel) {
                self.channels.push(channel.clone());
                changed = true;
            }
        }
        changed
    }
}
