//! voicelab: command-line client for a voice-cloning service.
//!
//! Record or upload a short voice sample, let the service transcribe it,
//! then generate speech from arbitrary text with that voice or one of the
//! predefined voices. Also mints API keys for the service's external
//! bearer-token TTS surface.

pub mod audio;
pub mod backend;
pub mod cli;
pub mod profile;
pub mod studio;
