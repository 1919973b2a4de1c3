//! Image analysis command
//!
//! Reads an image file, detects its actual format, and asks the model a
//! question about it. The detected MIME type is sent with the image bytes
//! rather than assuming JPEG, so PNG and WebP uploads are declared
//! correctly.

use crate::config::Config;
use crate::error::{NexusError, Result};
use crate::gemini::GeminiClient;
use crate::history::{HistoryLog, ToolKind};
use base64::Engine;
use colored::Colorize;
use image::ImageFormat;
use std::path::PathBuf;

/// Run the vision command
pub async fn run_vision(config: Config, image_path: PathBuf, prompt: String) -> Result<()> {
    let bytes = std::fs::read(&image_path).map_err(|e| {
        NexusError::FileLoad(format!("cannot read {}: {}", image_path.display(), e))
    })?;
    let mime_type = detect_mime_type(&bytes)?;
    tracing::debug!(
        "Analyzing {} ({} bytes, {})",
        image_path.display(),
        bytes.len(),
        mime_type
    );

    let client = GeminiClient::new(config.gemini.clone())?;
    let history = HistoryLog::new()?;

    let image_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

    println!("{}", "Analyzing image...".dimmed());
    let analysis = match client.analyze_image(&image_base64, mime_type, &prompt).await {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{}", "Error occurred during analysis.".red());
            return Err(e);
        }
    };

    println!("{}", analysis);
    history.append(ToolKind::Vision, &prompt, &analysis)?;
    Ok(())
}

/// Detect the MIME type of image bytes from their magic numbers
///
/// Only formats the API accepts as inline images are allowed; anything
/// else is rejected before the network call.
fn detect_mime_type(bytes: &[u8]) -> Result<&'static str> {
    let format = image::guess_format(bytes)
        .map_err(|e| NexusError::FileLoad(format!("unrecognized image data: {}", e)))?;
    match format {
        ImageFormat::Png => Ok("image/png"),
        ImageFormat::Jpeg => Ok("image/jpeg"),
        ImageFormat::WebP => Ok("image/webp"),
        ImageFormat::Gif => Ok("image/gif"),
        other => Err(NexusError::FileLoad(format!(
            "unsupported image format {:?} (expected PNG, JPEG, WebP, or GIF)",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime_type_png() {
        let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(detect_mime_type(&png_magic).unwrap(), "image/png");
    }

    #[test]
    fn test_detect_mime_type_jpeg() {
        let jpeg_magic = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];
        assert_eq!(detect_mime_type(&jpeg_magic).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_detect_mime_type_gif() {
        let gif_magic = *b"GIF89a\x00\x00";
        assert_eq!(detect_mime_type(&gif_magic).unwrap(), "image/gif");
    }

    #[test]
    fn test_detect_mime_type_rejects_garbage() {
        let err = detect_mime_type(b"definitely not an image").unwrap_err();
        assert!(err.to_string().contains("unrecognized image data"));
    }
}
