//! Reference profile persistence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during profile storage.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("No active reference profile. Record or upload a voice sample first.")]
    NoActiveProfile,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The active reference profile: a transcribed voice sample waiting to be
/// used for generation or registered as a custom voice.
///
/// At most one profile is active at a time; a new upload replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceProfile {
    /// Server-side path of the converted sample.
    pub audio_path: String,
    /// Server-side path of the transcript file.
    pub text_path: String,
    pub transcript: String,
    /// Set once the user confirms the transcript; generation requires it.
    pub submitted: bool,
    pub created_at: String,
}

/// Persists the active reference profile between CLI invocations.
pub struct ProfileStore {
    data_dir: PathBuf,
}

impl ProfileStore {
    /// Create a store rooted at the default data directory.
    pub fn new() -> Self {
        let data_dir = dirs::home_dir()
            .expect("Could not find home directory")
            .join(".voicelab");

        Self { data_dir }
    }

    /// Create a store rooted at a custom directory.
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn profile_path(&self) -> PathBuf {
        self.data_dir.join("reference.json")
    }

    /// Save the active profile, replacing any previous one.
    pub fn save(&self, profile: &ReferenceProfile) -> Result<(), ProfileError> {
        std::fs::create_dir_all(&self.data_dir)?;

        let json = serde_json::to_string_pretty(profile)?;
        std::fs::write(self.profile_path(), json)?;

        Ok(())
    }

    /// Load the active profile.
    pub fn load(&self) -> Result<ReferenceProfile, ProfileError> {
        let path = self.profile_path();

        if !path.exists() {
            return Err(ProfileError::NoActiveProfile);
        }

        let json = std::fs::read_to_string(path)?;
        let profile = serde_json::from_str(&json)?;

        Ok(profile)
    }

    /// Discard the active profile, if any.
    pub fn clear(&self) -> Result<(), ProfileError> {
        let path = self.profile_path();

        if path.exists() {
            std::fs::remove_file(path)?;
        }

        Ok(())
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}
