//! Interactive and one-shot chat command
//!
//! Each exchange sends the full prior turn sequence plus the new message,
//! with web-search grounding enabled. The interactive loop awaits each
//! exchange before accepting the next line, so at most one request is in
//! flight. A failed exchange is folded into the conversation as a fixed
//! apologetic turn instead of ending the session.

use crate::config::Config;
use crate::error::Result;
use crate::gemini::{ChatReply, ChatTurn, GeminiClient};
use crate::history::{HistoryLog, ToolKind};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Turn substituted into the conversation when an exchange fails
const ERROR_TURN: &str = "I encountered an error processing that request. Please try again.";

/// Run the chat command
///
/// With a message, performs a single exchange and exits. Without one,
/// starts an interactive session (`/quit` to leave).
pub async fn run_chat(config: Config, message: Option<String>) -> Result<()> {
    let client = GeminiClient::new(config.gemini.clone())?;
    let history = HistoryLog::new()?;

    match message {
        Some(message) => {
            let reply = client.chat(&message, &[]).await?;
            print_reply(&reply);
            history.append(ToolKind::Chat, &message, &reply.text)?;
            Ok(())
        }
        None => run_interactive(client, history).await,
    }
}

/// Interactive chat loop
async fn run_interactive(client: GeminiClient, history: HistoryLog) -> Result<()> {
    println!(
        "{}",
        "Nexus chat — grounded with Google Search. Type /quit to exit.".dimmed()
    );

    let mut editor = DefaultEditor::new()?;
    let mut turns: Vec<ChatTurn> = Vec::new();

    loop {
        let line = match editor.readline("you › ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" || message == "/exit" {
            break;
        }
        let _ = editor.add_history_entry(message);

        match client.chat(message, &turns).await {
            Ok(reply) => {
                print_reply(&reply);
                history.append(ToolKind::Chat, message, &reply.text)?;
                turns.push(ChatTurn::user(message));
                turns.push(ChatTurn::model(&reply.text));
            }
            Err(e) => {
                tracing::error!("chat exchange failed: {}", e);
                println!("{}", ERROR_TURN.red());
                // Keep the failed exchange in the transcript so the model
                // sees the same conversation the user does.
                turns.push(ChatTurn::user(message));
                turns.push(ChatTurn::model(ERROR_TURN));
            }
        }
    }

    println!("{}", "Goodbye.".dimmed());
    Ok(())
}

/// Print a reply with its numbered source citations
fn print_reply(reply: &ChatReply) {
    println!("{}", reply.text);
    if !reply.citations.is_empty() {
        println!("{}", "Sources:".bold());
        for (i, citation) in reply.citations.iter().enumerate() {
            println!(
                "  [{}] {} {}",
                i + 1,
                citation.title,
                citation.uri.dimmed()
            );
        }
    }
}
