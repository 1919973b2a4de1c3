//! Image generation command
//!
//! Generates an image from a prompt, writes it to disk as a PNG, and
//! records the invocation in the history log.

use crate::config::Config;
use crate::error::{NexusError, Result};
use crate::gemini::{data_uri, AspectRatio, GeminiClient};
use crate::history::{HistoryLog, ToolKind};
use base64::Engine;
use colored::Colorize;
use std::path::PathBuf;

/// Run the image command
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `prompt` - The image prompt
/// * `aspect_ratio` - Ratio string (1:1, 3:4, 4:3, 9:16, 16:9)
/// * `output` - Optional output path; defaults to `nexus-<id>.png`
pub async fn run_image(
    config: Config,
    prompt: String,
    aspect_ratio: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let ratio: AspectRatio = aspect_ratio.parse()?;
    let client = GeminiClient::new(config.gemini.clone())?;
    let history = HistoryLog::new()?;

    println!("{}", format!("Generating image ({})...", ratio).dimmed());

    let uri = match client.generate_image(&prompt, ratio).await {
        Ok(uri) => uri,
        Err(e) => {
            eprintln!(
                "{}",
                "Failed to generate image. Please try a different prompt.".red()
            );
            return Err(e);
        }
    };

    let entry = history.append(ToolKind::ImageGen, &prompt, &uri)?;

    let (_mime, payload) = data_uri::split(&uri)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| NexusError::Api(format!("invalid image payload: {}", e)))?;

    let path = output.unwrap_or_else(|| {
        let id = entry.id.simple().to_string();
        PathBuf::from(format!("nexus-{}.png", &id[..8]))
    });
    std::fs::write(&path, &bytes)?;

    println!(
        "{} {} ({} bytes)",
        "Saved".green(),
        path.display(),
        bytes.len()
    );
    Ok(())
}
