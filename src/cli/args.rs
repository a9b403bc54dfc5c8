//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Voice-cloning workspace CLI.
#[derive(Parser, Debug)]
#[command(name = "voicelab")]
#[command(about = "Clone a voice from a short sample and generate speech from text")]
#[command(version)]
pub struct Args {
    /// Service host address
    #[arg(long, default_value = "localhost", global = true)]
    pub host: String,

    /// Service port
    #[arg(long, default_value = "4000", global = true)]
    pub port: u16,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a voice sample from the microphone and upload it as the
    /// reference profile
    Record {
        /// Input device name (defaults to the system microphone)
        #[arg(long)]
        device: Option<String>,
    },

    /// Upload an audio file (WAV/MP3) as the reference profile
    Upload {
        /// Audio file to upload
        file: PathBuf,
    },

    /// Confirm the transcript and mark the reference eligible for generation
    Submit,

    /// Show the active reference profile
    Status,

    /// Generate speech from text
    Generate {
        /// Text to synthesize
        text: String,

        /// Use a named voice instead of the reference profile
        #[arg(long)]
        voice: Option<String>,

        /// Output audio file
        #[arg(short, long, default_value = "output.wav")]
        output: PathBuf,

        /// Play the generated audio after saving it
        #[arg(long)]
        play: bool,
    },

    /// Register the reference profile as a named custom voice
    SaveVoice {
        /// Name for the custom voice
        name: String,
    },

    /// List voices registered with the service
    Voices {
        /// Show custom voices only
        #[arg(long)]
        custom: bool,

        /// Copy the named voice's ID to the clipboard
        #[arg(long, value_name = "NAME")]
        copy_id: Option<String>,
    },

    /// Mint an API key for the external TTS surface
    CreateKey {
        /// Name for the API key
        name: String,

        /// Copy the key to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Mint a voice-bound voice ID and API key from the reference profile
    CreateVoiceApi,

    /// Create API entries for all predefined voices
    Provision,

    /// Call the external bearer-token API surface
    Api {
        #[command(subcommand)]
        command: ApiCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ApiCommand {
    /// Synthesize speech through /api/tts
    Tts {
        /// Text to synthesize
        text: String,

        /// API key (Bearer token)
        #[arg(long)]
        key: String,

        /// Voice ID, e.g. voice_professor_abed
        #[arg(long)]
        voice_id: String,

        /// Server-side output path; defaults to a timestamped file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List voices available to an API key through /api/voices
    Voices {
        /// API key (Bearer token)
        #[arg(long)]
        key: String,
    },
}
