//! Nexus - Multimodal AI studio CLI
//!
//! Main entry point: parses the CLI, loads configuration, and dispatches
//! to the tool command handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nexus::cli::{Cli, Commands};
use nexus::commands;
use nexus::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { message } => {
            tracing::info!("Starting chat");
            commands::chat::run_chat(config, message).await?;
            Ok(())
        }
        Commands::Image {
            prompt,
            aspect_ratio,
            output,
        } => {
            tracing::info!("Starting image generation");
            commands::image::run_image(config, prompt, aspect_ratio, output).await?;
            Ok(())
        }
        Commands::Vision { image, prompt } => {
            tracing::info!("Starting image analysis");
            commands::vision::run_vision(config, image, prompt).await?;
            Ok(())
        }
        Commands::Speech {
            text,
            voice,
            output,
            no_play,
        } => {
            tracing::info!("Starting speech synthesis");
            commands::speech::run_speech(config, text, voice, output, no_play).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(command)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "nexus=debug" } else { "nexus=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
