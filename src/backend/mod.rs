//! Communication with the voice-cloning service.
//!
//! Every heavy operation (transcription, speaker embedding, synthesis) happens
//! on the service side; this module only shuttles files and JSON over HTTP.

mod client;
mod types;

pub use client::HttpServiceClient;
pub use types::{
    ApiCredential, ApiTtsRequest, ApiTtsResponse, ApiVoice, ApiVoicesResponse, CustomVoice,
    CustomVoicesResponse, GenerateRequest, GenerateWithVoiceRequest, GeneratedSpeech,
    ProvisionedApis, ReferenceUpload, SaveVoiceRequest, SavedVoice, ServiceError, Voice, VoiceApi,
    VoicesResponse, derive_voice_id,
};

/// Trait for service communication.
///
/// Abstracts the HTTP calls to the voice-cloning service so that the
/// workspace session can be tested against a mock.
#[cfg_attr(test, mockall::automock)]
pub trait ServiceClient: Send + Sync {
    /// Upload a reference sample; the service transcribes it and returns the
    /// server-side audio/text paths together with the transcript.
    fn upload_reference(&self, audio_path: &std::path::Path)
    -> Result<ReferenceUpload, ServiceError>;

    /// List all voices, predefined and custom.
    fn get_voices(&self) -> Result<VoicesResponse, ServiceError>;

    /// List custom voices only.
    fn get_custom_voices(&self) -> Result<CustomVoicesResponse, ServiceError>;

    /// Register a named custom voice from uploaded reference paths.
    fn save_custom_voice(&self, request: &SaveVoiceRequest) -> Result<SavedVoice, ServiceError>;

    /// Mint a named API key with access to all registered voices.
    fn create_api_key(&self, api_name: &str) -> Result<ApiCredential, ServiceError>;

    /// Mint a voice-bound voice ID plus API key from reference paths.
    fn create_voice_api<'a>(
        &self,
        audio_path: &str,
        text_path: &str,
        voice_name: Option<&'a str>,
    ) -> Result<VoiceApi, ServiceError>;

    /// Create API entries for every predefined voice.
    fn create_predefined_apis(&self) -> Result<ProvisionedApis, ServiceError>;

    /// Generate speech conditioned on the uploaded reference.
    fn generate_speech(&self, request: &GenerateRequest) -> Result<GeneratedSpeech, ServiceError>;

    /// Generate speech with a named voice.
    fn generate_speech_with_voice(
        &self,
        request: &GenerateWithVoiceRequest,
    ) -> Result<GeneratedSpeech, ServiceError>;

    /// Fetch a generated audio file. The URL carries a cache-busting
    /// timestamp because the service reuses output filenames.
    fn download(&self, output_path: &str) -> Result<Vec<u8>, ServiceError>;

    /// Bearer-token TTS call on the external `/api/tts` surface.
    fn api_tts(&self, api_key: &str, request: &ApiTtsRequest)
    -> Result<ApiTtsResponse, ServiceError>;

    /// Bearer-token voice listing on the external `/api/voices` surface.
    fn api_voices(&self, api_key: &str) -> Result<ApiVoicesResponse, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn voice(name: &str, predefined: bool, audio_exists: bool) -> Voice {
        Voice {
            id: 1,
            name: name.to_string(),
            audio_path: format!("samples/{}.wav", derive_voice_id(name)),
            text_path: format!("samples/{}.txt", derive_voice_id(name)),
            is_predefined: predefined,
            voice_id: None,
            created_at: None,
            audio_exists,
        }
    }

    #[test]
    fn test_mock_upload_reference() {
        let mut mock = MockServiceClient::new();

        mock.expect_upload_reference()
            .withf(|path| path == PathBuf::from("/tmp/sample.wav").as_path())
            .times(1)
            .returning(|_| {
                Ok(ReferenceUpload {
                    audio_path: "samples/reference.wav".to_string(),
                    text_path: "samples/reference.txt".to_string(),
                    transcript: "Testing one two three.".to_string(),
                    ref_id: Some("reference".to_string()),
                })
            });

        let result = mock.upload_reference(PathBuf::from("/tmp/sample.wav").as_path());
        assert!(result.is_ok());
        assert_eq!(result.unwrap().transcript, "Testing one two three.");
    }

    #[test]
    fn test_mock_get_voices() {
        let mut mock = MockServiceClient::new();

        mock.expect_get_voices().times(1).returning(|| {
            Ok(VoicesResponse {
                voices: vec![
                    voice("Professor Abed", true, true),
                    voice("Christine", true, false),
                ],
            })
        });

        let voices = mock.get_voices().unwrap().voices;
        assert_eq!(voices.len(), 2);
        assert!(voices[0].selectable());
        assert!(!voices[1].selectable());
    }

    #[test]
    fn test_mock_generate_speech() {
        let mut mock = MockServiceClient::new();

        mock.expect_generate_speech()
            .withf(|req| req.input_text == "Hello" && req.ref_audio_path == "samples/reference.wav")
            .times(1)
            .returning(|_| {
                Ok(GeneratedSpeech {
                    output_path: "output.wav".to_string(),
                })
            });

        let request = GenerateRequest {
            input_text: "Hello".to_string(),
            ref_audio_path: "samples/reference.wav".to_string(),
            ref_text_path: "samples/reference.txt".to_string(),
        };

        let result = mock.generate_speech(&request);
        assert_eq!(result.unwrap().output_path, "output.wav");
    }

    #[test]
    fn test_mock_service_error_message_passthrough() {
        let mut mock = MockServiceClient::new();

        mock.expect_generate_speech().times(1).returning(|_| {
            Err(ServiceError::Service(
                "Audio file not found for Saad. Please upload the audio file.".to_string(),
            ))
        });

        let request = GenerateRequest {
            input_text: "Hello".to_string(),
            ref_audio_path: "samples/reference.wav".to_string(),
            ref_text_path: "samples/reference.txt".to_string(),
        };

        let err = mock.generate_speech(&request).unwrap_err();
        // The service-provided message must surface verbatim.
        assert_eq!(
            err.to_string(),
            "Audio file not found for Saad. Please upload the audio file."
        );
    }

    #[test]
    fn test_mock_create_api_key() {
        let mut mock = MockServiceClient::new();

        mock.expect_create_api_key()
            .with(mockall::predicate::eq("My Voice App"))
            .times(1)
            .returning(|name| {
                Ok(ApiCredential {
                    api_name: name.to_string(),
                    api_key: "sk_0123456789abcdef0123456789abcdef".to_string(),
                    created_at: None,
                    voice_count: 3,
                })
            });

        let credential = mock.create_api_key("My Voice App").unwrap();
        assert!(credential.api_key.starts_with("sk_"));
        assert_eq!(credential.voice_count, 3);
    }

    #[test]
    fn test_mock_download() {
        let mut mock = MockServiceClient::new();

        mock.expect_download()
            .with(mockall::predicate::eq("output.wav"))
            .times(1)
            .returning(|_| Ok(b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec()));

        let audio = mock.download("output.wav").unwrap();
        assert!(audio.starts_with(b"RIFF"));
    }

    #[test]
    fn test_http_client_base_url() {
        let client = HttpServiceClient::new("localhost", 4000);
        assert_eq!(client.base_url(), "http://localhost:4000");
    }
}
