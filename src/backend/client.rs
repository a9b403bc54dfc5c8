//! HTTP client for the voice-cloning service.

use std::path::Path;

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ServiceClient;
use super::types::{
    ApiCredential, ApiTtsRequest, ApiTtsResponse, ApiVoicesResponse, CustomVoicesResponse,
    GenerateRequest, GenerateWithVoiceRequest, GeneratedSpeech, ProvisionedApis, ReferenceUpload,
    SaveVoiceRequest, SavedVoice, ServiceError, VoiceApi, VoicesResponse,
};

/// HTTP-based service client.
pub struct HttpServiceClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpServiceClient {
    /// Create a new HTTP service client.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            base_url: format!("http://{host}:{port}"),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Get the base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extract the service's error message from a failed response.
    ///
    /// The service reports failures as `{"error": "<message>"}`. When the body
    /// is not in that shape, fall back to the HTTP status line.
    fn error_from(response: reqwest::blocking::Response) -> ServiceError {
        let status = response.status();

        if let Ok(body) = response.json::<serde_json::Value>()
            && let Some(message) = body.get("error").and_then(|e| e.as_str())
        {
            return ServiceError::Service(message.to_string());
        }

        ServiceError::RequestFailed(format!("Status: {status}"))
    }

    /// Send a GET request and decode the JSON response.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response));
        }

        response
            .json()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    /// Send a JSON POST request and decode the JSON response.
    fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response));
        }

        response
            .json()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}

impl ServiceClient for HttpServiceClient {
    fn upload_reference(&self, audio_path: &Path) -> Result<ReferenceUpload, ServiceError> {
        let url = format!("{}/upload_reference", self.base_url);

        let audio_data = std::fs::read(audio_path)
            .map_err(|_| ServiceError::FileNotFound(audio_path.display().to_string()))?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("reference.wav")
            .to_string();

        let mime = if file_name.to_lowercase().ends_with(".mp3") {
            "audio/mpeg"
        } else {
            "audio/wav"
        };

        let file_part = reqwest::blocking::multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let form = reqwest::blocking::multipart::Form::new().part("audio", file_part);

        debug!(%url, path = %audio_path.display(), "uploading reference");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response));
        }

        response
            .json()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    fn get_voices(&self) -> Result<VoicesResponse, ServiceError> {
        self.get_json("/get_voices")
    }

    fn get_custom_voices(&self) -> Result<CustomVoicesResponse, ServiceError> {
        self.get_json("/get_custom_voices")
    }

    fn save_custom_voice(&self, request: &SaveVoiceRequest) -> Result<SavedVoice, ServiceError> {
        self.post_json("/save_custom_voice", request)
    }

    fn create_api_key(&self, api_name: &str) -> Result<ApiCredential, ServiceError> {
        self.post_json(
            "/create_api_key",
            &serde_json::json!({ "api_name": api_name }),
        )
    }

    fn create_voice_api(
        &self,
        audio_path: &str,
        text_path: &str,
        voice_name: Option<&str>,
    ) -> Result<VoiceApi, ServiceError> {
        self.post_json(
            "/create_voice_api",
            &serde_json::json!({
                "audio_path": audio_path,
                "text_path": text_path,
                "voice_name": voice_name,
            }),
        )
    }

    fn create_predefined_apis(&self) -> Result<ProvisionedApis, ServiceError> {
        self.post_json("/create_predefined_apis", &serde_json::json!({}))
    }

    fn generate_speech(&self, request: &GenerateRequest) -> Result<GeneratedSpeech, ServiceError> {
        self.post_json("/generate_speech", request)
    }

    fn generate_speech_with_voice(
        &self,
        request: &GenerateWithVoiceRequest,
    ) -> Result<GeneratedSpeech, ServiceError> {
        self.post_json("/generate_speech_with_voice", request)
    }

    fn download(&self, output_path: &str) -> Result<Vec<u8>, ServiceError> {
        // Cache-busting timestamp: the service reuses output filenames, so
        // intermediate caches must not serve a previous generation.
        let url = format!(
            "{}/download/{output_path}?t={}",
            self.base_url,
            Utc::now().timestamp_millis()
        );
        debug!(%url, "downloading output");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    fn api_tts(&self, api_key: &str, request: &ApiTtsRequest) -> Result<ApiTtsResponse, ServiceError> {
        let url = format!("{}/api/tts", self.base_url);
        debug!(%url, voice_id = %request.voice_id, "POST (bearer)");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response));
        }

        response
            .json()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    fn api_voices(&self, api_key: &str) -> Result<ApiVoicesResponse, ServiceError> {
        let url = format!("{}/api/voices", self.base_url);
        debug!(%url, "GET (bearer)");

        let response = self
            .client
            .get(&url)
            .bearer_auth(api_key)
            .send()
            .map_err(|e| ServiceError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response));
        }

        response
            .json()
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}
