//! Record types for the activity history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which tool produced a history entry
///
/// The serialized names (`CHAT`, `IMAGE_GEN`, `VISION`, `SPEECH`) are the
/// on-disk wire format of `history.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    #[serde(rename = "CHAT")]
    Chat,
    #[serde(rename = "IMAGE_GEN")]
    ImageGen,
    #[serde(rename = "VISION")]
    Vision,
    #[serde(rename = "SPEECH")]
    Speech,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::Chat => write!(f, "CHAT"),
            ToolKind::ImageGen => write!(f, "IMAGE_GEN"),
            ToolKind::Vision => write!(f, "VISION"),
            ToolKind::Speech => write!(f, "SPEECH"),
        }
    }
}

/// A durable record of one completed tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Which tool produced this entry
    #[serde(rename = "type")]
    pub kind: ToolKind,
    /// Short label (the prompt or message that triggered the call)
    pub title: String,
    /// Result payload: reply text, image data URI, or composite string
    pub content: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Mint a new entry with a fresh id and the current time
    pub fn new(kind: ToolKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Filter applied when listing history entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// Keep everything (the identity filter)
    #[default]
    All,
    /// Keep only entries of one kind
    Only(ToolKind),
}

impl KindFilter {
    /// Whether an entry passes this filter
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(kind) => entry.kind == *kind,
        }
    }
}

impl std::str::FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(KindFilter::All),
            "chat" => Ok(KindFilter::Only(ToolKind::Chat)),
            "image-gen" | "image_gen" => Ok(KindFilter::Only(ToolKind::ImageGen)),
            "vision" => Ok(KindFilter::Only(ToolKind::Vision)),
            "speech" => Ok(KindFilter::Only(ToolKind::Speech)),
            other => Err(format!(
                "unknown kind '{}' (expected all, chat, image-gen, vision, or speech)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_serialized_values() {
        assert_eq!(serde_json::to_string(&ToolKind::Chat).unwrap(), "\"CHAT\"");
        assert_eq!(
            serde_json::to_string(&ToolKind::ImageGen).unwrap(),
            "\"IMAGE_GEN\""
        );
        assert_eq!(
            serde_json::to_string(&ToolKind::Vision).unwrap(),
            "\"VISION\""
        );
        assert_eq!(
            serde_json::to_string(&ToolKind::Speech).unwrap(),
            "\"SPEECH\""
        );
    }

    #[test]
    fn test_entry_serializes_kind_as_type_field() {
        let entry = HistoryEntry::new(ToolKind::Speech, "title", "content");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "SPEECH");
        assert!(value.get("kind").is_none());
        assert!(value["id"].is_string());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = HistoryEntry::new(ToolKind::Chat, "hello", "world");
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, entry.id);
        assert_eq!(parsed.kind, ToolKind::Chat);
        assert_eq!(parsed.title, "hello");
        assert_eq!(parsed.content, "world");
        assert_eq!(parsed.timestamp, entry.timestamp);
    }

    #[test]
    fn test_entries_get_unique_ids() {
        let a = HistoryEntry::new(ToolKind::Chat, "a", "a");
        let b = HistoryEntry::new(ToolKind::Chat, "b", "b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_filter_all_is_identity() {
        let entry = HistoryEntry::new(ToolKind::Vision, "t", "c");
        assert!(KindFilter::All.matches(&entry));
    }

    #[test]
    fn test_kind_filter_only_matches_kind() {
        let chat = HistoryEntry::new(ToolKind::Chat, "t", "c");
        let speech = HistoryEntry::new(ToolKind::Speech, "t", "c");
        let filter = KindFilter::Only(ToolKind::Speech);
        assert!(!filter.matches(&chat));
        assert!(filter.matches(&speech));
    }

    #[test]
    fn test_kind_filter_from_str() {
        assert_eq!("all".parse::<KindFilter>().unwrap(), KindFilter::All);
        assert_eq!(
            "ALL".parse::<KindFilter>().unwrap(),
            KindFilter::All,
            "filter parsing is case-insensitive"
        );
        assert_eq!(
            "image-gen".parse::<KindFilter>().unwrap(),
            KindFilter::Only(ToolKind::ImageGen)
        );
        assert!("video".parse::<KindFilter>().is_err());
    }
}
