//! Command-line interface definition for Nexus
//!
//! This module defines the CLI structure using clap's derive API,
//! providing one subcommand per tool: chat, image generation, image
//! analysis, speech synthesis, and history management.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Nexus - Multimodal AI studio CLI
///
/// Chat with web-grounded search, generate and analyze images, and
/// synthesize speech through the Gemini API, with a local activity
/// history.
#[derive(Parser, Debug, Clone)]
#[command(name = "nexus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Nexus
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Chat with the model (web-grounded); interactive when no message is given
    Chat {
        /// One-shot message; omit to start an interactive session
        message: Option<String>,
    },

    /// Generate an image from a text prompt
    Image {
        /// The image prompt
        prompt: String,

        /// Aspect ratio: 1:1, 3:4, 4:3, 9:16, or 16:9
        #[arg(short, long, default_value = "1:1")]
        aspect_ratio: String,

        /// Output PNG path (defaults to nexus-<id>.png in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze an image with a question
    Vision {
        /// Path to the image file (PNG, JPEG, WebP, or GIF)
        image: PathBuf,

        /// The analysis question
        #[arg(short, long, default_value = "Describe this image in detail.")]
        prompt: String,
    },

    /// Synthesize speech from text
    Speech {
        /// The text to speak
        text: String,

        /// Prebuilt voice name (Kore, Puck, Charon, Fenrir, Zephyr)
        #[arg(long)]
        voice: Option<String>,

        /// Also write the audio to a WAV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip playback (useful with --output on headless machines)
        #[arg(long)]
        no_play: bool,
    },

    /// Manage the activity history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List past activity, most recent first
    List {
        /// Filter by kind: all, chat, image-gen, vision, or speech
        #[arg(short, long, default_value = "all")]
        kind: String,
    },

    /// Clear all history (irreversible)
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
