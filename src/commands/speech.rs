//! Speech synthesis command
//!
//! Synthesizes speech for a text, decodes the returned PCM payload, and
//! plays it and/or writes it to a WAV file.

use crate::audio;
use crate::config::Config;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::history::{HistoryLog, ToolKind};
use colored::Colorize;
use std::path::PathBuf;

/// Maximum title length for speech history entries
const TITLE_MAX_CHARS: usize = 50;

/// Run the speech command
pub async fn run_speech(
    config: Config,
    text: String,
    voice: Option<String>,
    output: Option<PathBuf>,
    no_play: bool,
) -> Result<()> {
    let voice = voice.unwrap_or_else(|| config.speech.voice.clone());
    let client = GeminiClient::new(config.gemini.clone())?;
    let history = HistoryLog::new()?;

    println!("{}", format!("Synthesizing with voice {}...", voice).dimmed());

    let payload = match client.synthesize_speech(&text, &voice).await {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("{}", "Speech generation failed.".red());
            return Err(e);
        }
    };

    let buffer = audio::decode_pcm(&payload)?;
    println!(
        "{} {:.1}s of audio at {} Hz",
        "Decoded".green(),
        buffer.duration(),
        buffer.sample_rate
    );

    history.append(
        ToolKind::Speech,
        truncate_title(&text),
        format!("Voice: {} | Script: {}", voice, text),
    )?;

    if let Some(path) = output {
        audio::wav::write_wav(&buffer, &path)?;
        println!("{} {}", "Saved".green(), path.display());
    }

    if !no_play {
        println!("{}", "Playing...".dimmed());
        audio::playback::play(&buffer)?;
    }

    Ok(())
}

/// Truncate a title on a char boundary, adding an ellipsis when shortened
fn truncate_title(text: &str) -> String {
    if text.chars().count() <= TITLE_MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_short_text_unchanged() {
        assert_eq!(truncate_title("Hello"), "Hello");
    }

    #[test]
    fn test_truncate_title_exactly_fifty_chars_unchanged() {
        let text = "a".repeat(50);
        assert_eq!(truncate_title(&text), text);
    }

    #[test]
    fn test_truncate_title_long_text_gets_ellipsis() {
        let text = "a".repeat(60);
        let title = truncate_title(&text);
        assert_eq!(title.len(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_truncate_title_multibyte_safe() {
        let text = "é".repeat(60);
        let title = truncate_title(&text);
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), 53);
    }
}
