//! Workspace session implementation.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use crate::backend::{
    ApiCredential, ApiTtsRequest, ApiTtsResponse, ApiVoicesResponse, CustomVoice, GenerateRequest,
    GenerateWithVoiceRequest, GeneratedSpeech, ProvisionedApis, SaveVoiceRequest, SavedVoice,
    ServiceClient, ServiceError, Voice, VoiceApi,
};
use crate::profile::{ProfileError, ProfileStore, ReferenceProfile};

/// The service splits input at roughly this many words per synthesis chunk,
/// about 15 seconds of speech at 2.5 words per second.
pub const WORDS_PER_CHUNK: usize = 40;

/// Number of synthesis chunks the service will produce for the given text.
pub fn chunk_count(text: &str) -> usize {
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_CHUNK).max(1)
}

/// Errors that can occur during workspace operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Nothing to generate: text is empty")]
    EmptyText,

    #[error("No active reference profile. Record or upload a voice sample first.")]
    NoReference,

    #[error("Reference not submitted. Review the transcript and run `submit` first.")]
    NotSubmitted,

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("Voice '{0}' has no audio sample on the server and cannot be used")]
    VoiceUnavailable(String),

    #[error("A name is required")]
    MissingName,

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// The voice-cloning workspace.
///
/// Wraps a service client and the local profile store, and enforces the
/// workspace rules: one active reference at a time, generation only from a
/// submitted reference or a voice whose sample exists, and no request at all
/// when there is nothing to send.
pub struct Session<C: ServiceClient> {
    client: C,
    profiles: ProfileStore,
}

impl<C: ServiceClient> Session<C> {
    /// Create a new session.
    pub fn new(client: C, profiles: ProfileStore) -> Self {
        Self { client, profiles }
    }

    /// Upload a voice sample as the new reference profile.
    ///
    /// The previous profile, submitted or not, is replaced. The new profile
    /// starts unsubmitted and is not yet eligible for generation.
    pub fn upload_reference(&self, audio_path: &Path) -> Result<ReferenceProfile, SessionError> {
        let upload = self.client.upload_reference(audio_path)?;

        let profile = ReferenceProfile {
            audio_path: upload.audio_path,
            text_path: upload.text_path,
            transcript: upload.transcript,
            submitted: false,
            created_at: Utc::now().to_rfc3339(),
        };
        self.profiles.save(&profile)?;

        Ok(profile)
    }

    /// The active reference profile, if any.
    pub fn reference(&self) -> Result<ReferenceProfile, SessionError> {
        match self.profiles.load() {
            Ok(profile) => Ok(profile),
            Err(ProfileError::NoActiveProfile) => Err(SessionError::NoReference),
            Err(e) => Err(e.into()),
        }
    }

    /// Mark the active reference as submitted, making it eligible for
    /// generation. Idempotent.
    pub fn submit_reference(&self) -> Result<ReferenceProfile, SessionError> {
        let mut profile = self.reference()?;
        profile.submitted = true;
        self.profiles.save(&profile)?;
        Ok(profile)
    }

    /// Register the active reference as a named custom voice.
    ///
    /// The profile is cleared on success, matching the workspace flow where
    /// a saved voice starts a fresh reference.
    pub fn save_custom_voice(&self, name: &str) -> Result<SavedVoice, SessionError> {
        if name.trim().is_empty() {
            return Err(SessionError::MissingName);
        }

        let profile = self.reference()?;

        let request = SaveVoiceRequest {
            voice_name: name.to_string(),
            audio_path: profile.audio_path,
            text_path: profile.text_path,
            transcript: profile.transcript,
        };
        let saved = self.client.save_custom_voice(&request)?;

        self.profiles.clear()?;

        Ok(saved)
    }

    /// Generate speech with the active reference.
    ///
    /// Issues no request when the text is empty or the reference is missing
    /// or unsubmitted.
    pub fn generate(&self, text: &str) -> Result<GeneratedSpeech, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }

        let profile = self.reference()?;
        if !profile.submitted {
            return Err(SessionError::NotSubmitted);
        }

        let request = GenerateRequest {
            input_text: text.to_string(),
            ref_audio_path: profile.audio_path,
            ref_text_path: profile.text_path,
        };

        Ok(self.client.generate_speech(&request)?)
    }

    /// Generate speech with a named voice.
    ///
    /// The voice must exist and its sample must be present on the server;
    /// otherwise no generation request is issued.
    pub fn generate_with_voice(
        &self,
        voice_name: &str,
        text: &str,
    ) -> Result<GeneratedSpeech, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }

        let voices = self.client.get_voices()?.voices;
        let voice = voices
            .iter()
            .find(|v| v.name == voice_name)
            .ok_or_else(|| SessionError::VoiceNotFound(voice_name.to_string()))?;

        if !voice.selectable() {
            return Err(SessionError::VoiceUnavailable(voice.name.clone()));
        }

        let request = GenerateWithVoiceRequest {
            voice_name: voice.name.clone(),
            input_text: text.to_string(),
        };

        Ok(self.client.generate_speech_with_voice(&request)?)
    }

    /// Fetch generated audio bytes for an `output_path`.
    pub fn fetch_output(&self, output_path: &str) -> Result<Vec<u8>, SessionError> {
        Ok(self.client.download(output_path)?)
    }

    /// List all voices.
    pub fn voices(&self) -> Result<Vec<Voice>, SessionError> {
        Ok(self.client.get_voices()?.voices)
    }

    /// List custom voices only.
    pub fn custom_voices(&self) -> Result<Vec<CustomVoice>, SessionError> {
        Ok(self.client.get_custom_voices()?.voices)
    }

    /// Mint a named API key. The secret in the result is shown once and not
    /// retained anywhere on the client.
    pub fn create_api_key(&self, api_name: &str) -> Result<ApiCredential, SessionError> {
        if api_name.trim().is_empty() {
            return Err(SessionError::MissingName);
        }

        Ok(self.client.create_api_key(api_name)?)
    }

    /// Mint a voice-bound voice ID and key from the active reference.
    pub fn create_voice_api(&self) -> Result<VoiceApi, SessionError> {
        let profile = self.reference()?;

        Ok(self
            .client
            .create_voice_api(&profile.audio_path, &profile.text_path, None)?)
    }

    /// Create API entries for all predefined voices.
    pub fn provision_predefined(&self) -> Result<ProvisionedApis, SessionError> {
        Ok(self.client.create_predefined_apis()?)
    }

    /// Call the bearer-token TTS surface.
    pub fn api_tts(
        &self,
        api_key: &str,
        voice_id: &str,
        text: &str,
        output_path: Option<String>,
    ) -> Result<ApiTtsResponse, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }

        let request = ApiTtsRequest {
            voice_id: voice_id.to_string(),
            text: text.to_string(),
            output_path,
        };

        Ok(self.client.api_tts(api_key, &request)?)
    }

    /// List voices available to an API key.
    pub fn api_voices(&self, api_key: &str) -> Result<ApiVoicesResponse, SessionError> {
        Ok(self.client.api_voices(api_key)?)
    }
}
