//! History management command
//!
//! Lists past activity in a table and supports clearing all history with
//! explicit confirmation.

use crate::cli::HistoryCommand;
use crate::error::{NexusError, Result};
use crate::history::{self, HistoryLog, KindFilter, ToolKind};
use colored::Colorize;
use prettytable::{format, Table};
use std::io::Write;

/// Handle history commands
pub fn handle_history(command: HistoryCommand) -> Result<()> {
    let log = HistoryLog::new()?;

    match command {
        HistoryCommand::List { kind } => {
            let filter: KindFilter = kind
                .parse()
                .map_err(NexusError::Config)?;
            let entries = history::filter_by_kind(&log.read_all()?, filter);

            if entries.is_empty() {
                println!(
                    "{}",
                    "No past interactions found for this category.".yellow()
                );
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "When".bold(),
                "Kind".bold(),
                "Title".bold(),
                "Content".bold()
            ]);

            for entry in entries {
                let when = entry.timestamp.format("%Y-%m-%d %H:%M").to_string();
                let kind = colorize_kind(entry.kind);
                let title = preview(&entry.title, 40);
                let content = preview(&entry.content, 60);

                table.add_row(prettytable::row![when, kind, title, content]);
            }

            println!("\nActivity History:");
            table.printstd();
            println!();
        }
        HistoryCommand::Clear { yes } => {
            if !yes && !confirm("Are you sure you want to clear all history?")? {
                println!("Aborted.");
                return Ok(());
            }
            log.clear_all()?;
            println!("{}", "History cleared.".green());
        }
    }

    Ok(())
}

/// Color a kind label for the table
fn colorize_kind(kind: ToolKind) -> colored::ColoredString {
    match kind {
        ToolKind::Chat => "CHAT".cyan(),
        ToolKind::ImageGen => "IMAGE_GEN".magenta(),
        ToolKind::Vision => "VISION".blue(),
        ToolKind::Speech => "SPEECH".yellow(),
    }
}

/// Shorten a field for table display, on char boundaries
fn preview(text: &str, max_chars: usize) -> String {
    let flattened = text.replace('\n', " ");
    if flattened.chars().count() <= max_chars {
        flattened
    } else {
        let truncated: String = flattened.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Ask a yes/no question on stdin, defaulting to no
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 40), "hello");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "x".repeat(100);
        let shortened = preview(&text, 40);
        assert_eq!(shortened.chars().count(), 40);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(preview("a\nb", 40), "a b");
    }

    #[test]
    fn test_colorize_kind_covers_all_kinds() {
        for kind in [
            ToolKind::Chat,
            ToolKind::ImageGen,
            ToolKind::Vision,
            ToolKind::Speech,
        ] {
            assert!(!colorize_kind(kind).is_empty());
        }
    }
}
