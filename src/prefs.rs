use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Stored {
    #[serde(default)]
    mute: bool,
}

/// Sound preference kept between runs. Read once at startup, written on toggle.
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // A missing file means sound on
    pub fn load_mute(&self) -> Result<bool> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let stored: Stored = serde_json::from_slice(&bytes)?;
                Ok(stored.mute)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_mute(&self, mute: bool) -> Result<()> {
        let body = serde_json::to_vec_pretty(&Stored { mute })?;
        fs::write(&self.path, body)?;
        debug!("Mute preference saved to {}: {}", self.path.display(), mute);
        Ok(())
    }
}
