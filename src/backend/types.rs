//! Service request/response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when communicating with the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("{0}")]
    Service(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),
}

/// Derive the API-facing identifier for a voice name.
///
/// Lowercases the name and replaces every whitespace run with a single
/// underscore: "Professor Abed" becomes "voice_professor_abed". The service
/// derives IDs for predefined voices the same way, so this must not change.
pub fn derive_voice_id(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("voice_{slug}")
}

/// A voice registered with the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    pub id: i64,
    pub name: String,
    pub audio_path: String,
    pub text_path: String,
    pub is_predefined: bool,
    /// Server-assigned ID for custom voices; predefined voices use the
    /// derived form instead.
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// False when the sample file is missing on the server.
    #[serde(default)]
    pub audio_exists: bool,
}

impl Voice {
    /// The identifier shown to users and accepted by the external API.
    pub fn display_id(&self) -> String {
        match &self.voice_id {
            Some(id) => id.clone(),
            None => derive_voice_id(&self.name),
        }
    }

    /// Whether this voice can be selected for generation.
    pub fn selectable(&self) -> bool {
        self.audio_exists
    }
}

/// Response from the voice listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<Voice>,
}

/// A custom voice as returned by `/get_custom_voices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomVoice {
    pub id: i64,
    pub name: String,
    pub voice_id: String,
    pub audio_path: String,
    pub text_path: String,
}

/// Response from `/get_custom_voices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomVoicesResponse {
    pub voices: Vec<CustomVoice>,
}

/// Response from uploading a reference sample.
///
/// The service converts the sample to 24kHz mono WAV, transcribes it, and
/// returns the server-side paths along with the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceUpload {
    pub audio_path: String,
    pub text_path: String,
    pub transcript: String,
    #[serde(default)]
    pub ref_id: Option<String>,
}

/// Request to register a named custom voice.
#[derive(Debug, Clone, Serialize)]
pub struct SaveVoiceRequest {
    pub voice_name: String,
    pub audio_path: String,
    pub text_path: String,
    pub transcript: String,
}

/// Response from `/save_custom_voice`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedVoice {
    pub voice_id: String,
    pub voice_name: String,
}

/// A minted API credential. The key is shown once and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCredential {
    pub api_name: String,
    pub api_key: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub voice_count: usize,
}

/// Response from `/create_voice_api`: a voice-bound ID plus key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceApi {
    pub voice_id: String,
    pub api_key: String,
    #[serde(default)]
    pub voice_name: Option<String>,
}

/// Response from `/create_predefined_apis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionedApis {
    pub created_apis: Vec<VoiceApi>,
    pub master_api_key: String,
}

/// Request for speech generation from the active reference.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub input_text: String,
    pub ref_audio_path: String,
    pub ref_text_path: String,
}

/// Request for speech generation with a named voice.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateWithVoiceRequest {
    pub voice_name: String,
    pub input_text: String,
}

/// Response from either generation endpoint. The audio itself is fetched
/// separately through `/download/{output_path}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSpeech {
    pub output_path: String,
}

/// Request for the bearer-token `/api/tts` surface.
#[derive(Debug, Clone, Serialize)]
pub struct ApiTtsRequest {
    pub voice_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

/// Response from `/api/tts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTtsResponse {
    pub success: bool,
    pub output_path: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub voice_id: String,
    #[serde(default)]
    pub voice_name: Option<String>,
    #[serde(default)]
    pub word_count: usize,
}

/// A voice entry from the `/api/voices` surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVoice {
    pub voice_id: String,
    pub voice_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response from `/api/voices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiVoicesResponse {
    pub voices: Vec<ApiVoice>,
    #[serde(default)]
    pub total_voices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_voice_id_two_words() {
        assert_eq!(derive_voice_id("Professor Abed"), "voice_professor_abed");
    }

    #[test]
    fn test_derive_voice_id_single_word() {
        assert_eq!(derive_voice_id("Christine"), "voice_christine");
    }

    #[test]
    fn test_derive_voice_id_collapses_whitespace() {
        assert_eq!(derive_voice_id("  Tariq   Amin "), "voice_tariq_amin");
    }

    #[test]
    fn test_voice_display_id_prefers_server_id() {
        let voice = Voice {
            id: 7,
            name: "My Voice".to_string(),
            audio_path: "samples/my.wav".to_string(),
            text_path: "samples/my.txt".to_string(),
            is_predefined: false,
            voice_id: Some("voice_ab12cd34_ef56".to_string()),
            created_at: None,
            audio_exists: true,
        };
        assert_eq!(voice.display_id(), "voice_ab12cd34_ef56");
    }

    #[test]
    fn test_voice_display_id_falls_back_to_derived() {
        let voice = Voice {
            id: 1,
            name: "Professor Abed".to_string(),
            audio_path: "samples/professor_abed.wav".to_string(),
            text_path: "samples/professor_abed.txt".to_string(),
            is_predefined: true,
            voice_id: None,
            created_at: None,
            audio_exists: true,
        };
        assert_eq!(voice.display_id(), "voice_professor_abed");
    }

    #[test]
    fn test_voices_response_deserialize() {
        let json = r#"{
            "voices": [
                {
                    "id": 1,
                    "name": "Saad",
                    "audio_path": "samples/saad.wav",
                    "text_path": "samples/saad.txt",
                    "is_predefined": true,
                    "voice_id": null,
                    "created_at": "2024-01-01 00:00:00",
                    "audio_exists": true
                },
                {
                    "id": 4,
                    "name": "Mine",
                    "audio_path": "samples/reference.wav",
                    "text_path": "samples/reference.txt",
                    "is_predefined": false,
                    "voice_id": "voice_12345678_abcd",
                    "audio_exists": false
                }
            ]
        }"#;

        let response: VoicesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.voices.len(), 2);
        assert!(response.voices[0].is_predefined);
        assert!(response.voices[0].selectable());
        assert!(!response.voices[1].selectable());
    }

    #[test]
    fn test_reference_upload_deserialize() {
        let json = r#"{
            "audio_path": "samples/reference.wav",
            "text_path": "samples/reference.txt",
            "transcript": "Hello there.",
            "ref_id": "reference"
        }"#;

        let upload: ReferenceUpload = serde_json::from_str(json).unwrap();
        assert_eq!(upload.transcript, "Hello there.");
        assert_eq!(upload.ref_id.as_deref(), Some("reference"));
    }

    #[test]
    fn test_api_tts_request_omits_missing_output_path() {
        let request = ApiTtsRequest {
            voice_id: "voice_saad".to_string(),
            text: "Hello".to_string(),
            output_path: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("output_path"));
    }

    #[test]
    fn test_provisioned_apis_deserialize() {
        let json = r#"{
            "created_apis": [
                {"voice_id": "voice_saad", "voice_name": "Saad", "api_key": "mcr_master_api_key_2024"}
            ],
            "master_api_key": "mcr_master_api_key_2024"
        }"#;

        let provisioned: ProvisionedApis = serde_json::from_str(json).unwrap();
        assert_eq!(provisioned.created_apis.len(), 1);
        assert_eq!(provisioned.master_api_key, "mcr_master_api_key_2024");
    }
}
