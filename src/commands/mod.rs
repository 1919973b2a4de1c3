/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes one module per tool:

- `chat`    — One-shot or interactive grounded chat
- `image`   — Text-to-image generation
- `vision`  — Image analysis
- `speech`  — Speech synthesis with playback and WAV export
- `history` — Activity history listing and clearing
*/

pub mod chat;
pub mod history;
pub mod image;
pub mod speech;
pub mod vision;
