//! CLI argument parsing and clipboard helpers.

mod args;
mod clipboard;

pub use args::{ApiCommand, Args, Command};
pub use clipboard::{ClipboardError, CopyFeedback, FEEDBACK_HOLD, copy_text};

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::{Duration, Instant};

    #[test]
    fn test_parse_generate() {
        let args = Args::parse_from(["voicelab", "generate", "Hello world"]);

        match args.command {
            Command::Generate {
                text, voice, play, ..
            } => {
                assert_eq!(text, "Hello world");
                assert!(voice.is_none());
                assert!(!play);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate_with_voice() {
        let args = Args::parse_from([
            "voicelab",
            "generate",
            "Hello",
            "--voice",
            "Professor Abed",
            "--play",
        ]);

        match args.command {
            Command::Generate { voice, play, .. } => {
                assert_eq!(voice.as_deref(), Some("Professor Abed"));
                assert!(play);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_host_and_port() {
        let args = Args::parse_from(["voicelab", "--host", "10.0.0.5", "--port", "8080", "status"]);
        assert_eq!(args.host, "10.0.0.5");
        assert_eq!(args.port, 8080);
    }

    #[test]
    fn test_default_host_is_localhost_4000() {
        let args = Args::parse_from(["voicelab", "status"]);
        assert_eq!(args.host, "localhost");
        assert_eq!(args.port, 4000);
    }

    #[test]
    fn test_parse_api_tts() {
        let args = Args::parse_from([
            "voicelab",
            "api",
            "tts",
            "Hello there",
            "--key",
            "sk_abc",
            "--voice-id",
            "voice_saad",
        ]);

        match args.command {
            Command::Api {
                command:
                    ApiCommand::Tts {
                        text,
                        key,
                        voice_id,
                        output,
                    },
            } => {
                assert_eq!(text, "Hello there");
                assert_eq!(key, "sk_abc");
                assert_eq!(voice_id, "voice_saad");
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_voices_copy_id() {
        let args = Args::parse_from(["voicelab", "voices", "--copy-id", "Christine"]);

        match args.command {
            Command::Voices { custom, copy_id } => {
                assert!(!custom);
                assert_eq!(copy_id.as_deref(), Some("Christine"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Args::try_parse_from(["voicelab"]).is_err());
    }

    #[test]
    fn test_copy_feedback_holds_then_reverts() {
        let copied_at = Instant::now();
        let feedback = CopyFeedback::at(copied_at);

        assert_eq!(feedback.label_at(copied_at), "Copied");
        assert_eq!(
            feedback.label_at(copied_at + FEEDBACK_HOLD - Duration::from_millis(1)),
            "Copied"
        );
        assert_eq!(feedback.label_at(copied_at + FEEDBACK_HOLD), "Copy");
        assert_eq!(
            feedback.label_at(copied_at + Duration::from_secs(60)),
            "Copy"
        );
    }
}
