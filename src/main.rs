//! voicelab CLI entry point.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use voicelab::audio::{Player, Recorder, write_wav};
use voicelab::backend::{HttpServiceClient, ServiceClient, Voice};
use voicelab::cli::{ApiCommand, Args, Command, copy_text};
use voicelab::profile::ProfileStore;
use voicelab::studio::{Session, WORDS_PER_CHUNK, chunk_count};

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "voicelab=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = HttpServiceClient::new(&args.host, args.port);
    let base_url = client.base_url().to_string();
    let session = Session::new(client, ProfileStore::new());

    match args.command {
        Command::Record { device } => record(&session, device.as_deref()),
        Command::Upload { file } => upload(&session, &file),
        Command::Submit => submit(&session),
        Command::Status => status(&session),
        Command::Generate {
            text,
            voice,
            output,
            play,
        } => generate(&session, &text, voice.as_deref(), &output, play),
        Command::SaveVoice { name } => save_voice(&session, &name),
        Command::Voices { custom, copy_id } => voices(&session, custom, copy_id.as_deref()),
        Command::CreateKey { name, copy } => create_key(&session, &base_url, &name, copy),
        Command::CreateVoiceApi => create_voice_api(&session),
        Command::Provision => provision(&session),
        Command::Api { command } => match command {
            ApiCommand::Tts {
                text,
                key,
                voice_id,
                output,
            } => api_tts(&session, &key, &voice_id, &text, output),
            ApiCommand::Voices { key } => api_voices(&session, &key),
        },
    }
}

fn record<C: ServiceClient>(session: &Session<C>, device: Option<&str>) -> Result<()> {
    let recorder = Recorder::new(device).context("Failed to open microphone")?;

    println!("Recording... press Enter to stop.");
    let recording = recorder.start().context("Failed to start recording")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    let samples = recording.stop().context("Failed to stop recording")?;
    if samples.is_empty() {
        anyhow::bail!("Recording captured no audio");
    }
    println!(
        "Captured {:.1}s of audio.",
        samples.len() as f32 / voicelab::audio::SERVICE_SAMPLE_RATE as f32
    );

    let wav_path = std::env::temp_dir().join("voicelab_reference.wav");
    write_wav(&wav_path, &samples).context("Failed to write recording")?;

    upload(session, &wav_path)
}

fn upload<C: ServiceClient>(session: &Session<C>, file: &Path) -> Result<()> {
    println!("Uploading reference sample...");
    let profile = session
        .upload_reference(file)
        .context("Failed to upload reference")?;

    println!("Transcript: {}", profile.transcript);
    println!("Review it, then run `voicelab submit` to enable generation.");
    Ok(())
}

fn submit<C: ServiceClient>(session: &Session<C>) -> Result<()> {
    let profile = session
        .submit_reference()
        .context("Failed to submit reference")?;

    println!("Reference submitted.");
    println!("  Transcript: {}", profile.transcript);
    Ok(())
}

fn status<C: ServiceClient>(session: &Session<C>) -> Result<()> {
    let profile = session.reference().context("No reference available")?;

    println!("Active reference profile:");
    println!("  Audio: {}", profile.audio_path);
    println!("  Transcript: {}", profile.transcript);
    println!("  Created: {}", profile.created_at);
    println!(
        "  Submitted: {}",
        if profile.submitted { "yes" } else { "no" }
    );
    Ok(())
}

fn generate<C: ServiceClient>(
    session: &Session<C>,
    text: &str,
    voice: Option<&str>,
    output: &Path,
    play: bool,
) -> Result<()> {
    let words = text.split_whitespace().count();
    if words > WORDS_PER_CHUNK {
        println!(
            "{words} words: the service will split this into {} 15-second chunks.",
            chunk_count(text)
        );
    }

    println!("Generating speech...");
    let speech = match voice {
        Some(name) => session
            .generate_with_voice(name, text)
            .with_context(|| format!("Failed to generate speech with voice '{name}'"))?,
        None => session
            .generate(text)
            .context("Failed to generate speech")?,
    };

    let audio_data = session
        .fetch_output(&speech.output_path)
        .context("Failed to download generated audio")?;

    let mut file = fs::File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    file.write_all(&audio_data)
        .with_context(|| format!("Failed to write audio to: {}", output.display()))?;

    println!("Audio saved to: {}", output.display());
    println!("  Size: {} bytes", audio_data.len());

    if play {
        let player = Player::new().context("Failed to open audio output")?;
        player
            .play_wav(&audio_data)
            .context("Failed to play audio")?;
    }

    Ok(())
}

fn save_voice<C: ServiceClient>(session: &Session<C>, name: &str) -> Result<()> {
    let saved = session
        .save_custom_voice(name)
        .with_context(|| format!("Failed to save custom voice '{name}'"))?;

    println!("Custom voice saved: {}", saved.voice_name);
    println!("  Voice ID: {}", saved.voice_id);
    Ok(())
}

fn voices<C: ServiceClient>(
    session: &Session<C>,
    custom_only: bool,
    copy_id: Option<&str>,
) -> Result<()> {
    if custom_only {
        let voices = session
            .custom_voices()
            .context("Failed to list custom voices")?;

        if voices.is_empty() {
            println!("No custom voices found.");
            return Ok(());
        }

        println!("Custom voices:");
        for voice in voices {
            println!("  {} ({})", voice.name, voice.voice_id);
        }
        return Ok(());
    }

    let voices = session.voices().context("Failed to list voices")?;

    if voices.is_empty() {
        println!("No voices found.");
        return Ok(());
    }

    println!("Available voices:");
    for voice in &voices {
        print_voice(voice);
    }

    if let Some(name) = copy_id {
        let voice = voices
            .iter()
            .find(|v| v.name == name)
            .with_context(|| format!("Voice '{name}' not found"))?;
        anyhow::ensure!(
            voice.selectable(),
            "Voice '{name}' has no audio sample on the server"
        );

        let id = voice.display_id();
        let feedback = copy_text(&id).context("Failed to copy voice ID")?;
        println!("{}: {id}", feedback.label());
    }

    Ok(())
}

fn print_voice(voice: &Voice) {
    let kind = if voice.is_predefined {
        "predefined"
    } else {
        "custom"
    };
    println!("  {} ({kind})", voice.name);
    println!("    Voice ID: {}", voice.display_id());
    if voice.selectable() {
        println!("    Ready to use");
    } else {
        println!("    Audio file not found (expected: {})", voice.audio_path);
    }
}

fn create_key<C: ServiceClient>(
    session: &Session<C>,
    base_url: &str,
    name: &str,
    copy: bool,
) -> Result<()> {
    let credential = session
        .create_api_key(name)
        .with_context(|| format!("Failed to create API key '{name}'"))?;

    println!("API key created: {}", credential.api_name);
    println!("  Key: {}", credential.api_key);
    println!("  Voices available: {}", credential.voice_count);
    println!("Save this key securely. You won't be able to see it again.");

    if copy {
        let feedback = copy_text(&credential.api_key).context("Failed to copy API key")?;
        println!("{} to clipboard.", feedback.label());
    }

    println!();
    print_usage_examples(base_url, &credential.api_key);
    Ok(())
}

fn print_usage_examples(base_url: &str, api_key: &str) {
    println!("Usage examples:");
    println!();
    println!("  # Synthesize with a voice ID");
    println!("  curl -X POST {base_url}/api/tts \\");
    println!("    -H \"Authorization: Bearer {api_key}\" \\");
    println!("    -H \"Content-Type: application/json\" \\");
    println!("    -d '{{\"voice_id\": \"voice_professor_abed\", \"text\": \"Hello, this is my cloned voice!\"}}'");
    println!();
    println!("  # List available voices");
    println!("  curl -X GET {base_url}/api/voices \\");
    println!("    -H \"Authorization: Bearer {api_key}\"");
}

fn create_voice_api<C: ServiceClient>(session: &Session<C>) -> Result<()> {
    let api = session
        .create_voice_api()
        .context("Failed to create voice API")?;

    println!("Voice API created.");
    println!("  Voice ID: {}", api.voice_id);
    println!("  API key: {}", api.api_key);
    println!("Save the key securely. You won't be able to see it again.");
    Ok(())
}

fn provision<C: ServiceClient>(session: &Session<C>) -> Result<()> {
    let provisioned = session
        .provision_predefined()
        .context("Failed to provision predefined voices")?;

    println!(
        "Provisioned {} predefined voice(s):",
        provisioned.created_apis.len()
    );
    for api in &provisioned.created_apis {
        match &api.voice_name {
            Some(name) => println!("  {} ({})", api.voice_id, name),
            None => println!("  {}", api.voice_id),
        }
    }
    println!("Master API key: {}", provisioned.master_api_key);
    Ok(())
}

fn api_tts<C: ServiceClient>(
    session: &Session<C>,
    key: &str,
    voice_id: &str,
    text: &str,
    output: Option<String>,
) -> Result<()> {
    let response = session
        .api_tts(key, voice_id, text, output)
        .context("API TTS request failed")?;

    println!("Generated with {}.", response.voice_id);
    println!("  Server output: {}", response.output_path);
    if let Some(url) = &response.audio_url {
        println!("  Audio URL: {url}");
    }
    Ok(())
}

fn api_voices<C: ServiceClient>(session: &Session<C>, key: &str) -> Result<()> {
    let response = session.api_voices(key).context("Failed to list API voices")?;

    if response.voices.is_empty() {
        println!("No voices available for this key.");
        return Ok(());
    }

    println!("Voices available to this key ({}):", response.voices.len());
    for voice in &response.voices {
        println!("  {} ({})", voice.voice_id, voice.voice_name);
    }
    Ok(())
}
