//! Nexus - Multimodal AI studio CLI library
//!
//! This library provides the core functionality for the Nexus CLI: the
//! Gemini adapter layer, the audio decode pipeline, local activity
//! history, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `gemini`: Gemini API client — chat with web search, image generation,
//!   image analysis, and speech synthesis
//! - `audio`: PCM decoding, playback, and WAV export for synthesized speech
//! - `history`: Durable activity log in the user's data directory
//! - `commands`: Handlers behind each CLI subcommand
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use nexus::config::Config;
//! use nexus::gemini::GeminiClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let client = GeminiClient::new(config.gemini)?;
//!     let reply = client.chat("Hello!", &[]).await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gemini;
pub mod history;

// Re-export commonly used types
pub use config::Config;
pub use error::{NexusError, Result};
pub use gemini::{AspectRatio, ChatReply, ChatTurn, Citation, GeminiClient};
pub use history::{HistoryEntry, HistoryLog, KindFilter, ToolKind};
