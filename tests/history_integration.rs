use serial_test::serial;
use std::env;

use nexus::history::{filter_by_kind, HistoryLog, KindFilter, ToolKind, HISTORY_FILE_ENV};

#[test]
#[serial]
fn test_history_log_honors_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    env::set_var(HISTORY_FILE_ENV, path.to_string_lossy().to_string());

    let log = HistoryLog::new().unwrap();
    log.append(ToolKind::Chat, "hello", "world").unwrap();

    assert!(path.exists());
    let entries = log.read_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "hello");

    env::remove_var(HISTORY_FILE_ENV);
}

#[test]
fn test_append_then_read_is_most_recent_first() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new_with_path(dir.path().join("history.json")).unwrap();

    log.append(ToolKind::Chat, "A", "first").unwrap();
    log.append(ToolKind::Chat, "B", "second").unwrap();

    let entries = log.read_all().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "B");
    assert_eq!(entries[1].title, "A");
}

#[test]
fn test_clear_then_read_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new_with_path(dir.path().join("history.json")).unwrap();

    log.append(ToolKind::Speech, "t", "c").unwrap();
    log.clear_all().unwrap();

    assert!(log.read_all().unwrap().is_empty());
}

#[test]
fn test_filter_by_kind_returns_only_matching_entries() {
    let dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new_with_path(dir.path().join("history.json")).unwrap();

    log.append(ToolKind::Chat, "chat entry", "c").unwrap();
    log.append(ToolKind::Speech, "speech entry", "s").unwrap();

    let entries = log.read_all().unwrap();
    let speech = filter_by_kind(&entries, KindFilter::Only(ToolKind::Speech));
    assert_eq!(speech.len(), 1);
    assert_eq!(speech[0].title, "speech entry");
}

#[test]
fn test_log_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    {
        let log = HistoryLog::new_with_path(&path).unwrap();
        log.append(ToolKind::ImageGen, "a fox", "data:image/png;base64,AAAA")
            .unwrap();
    }

    let reopened = HistoryLog::new_with_path(&path).unwrap();
    let entries = reopened.read_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, ToolKind::ImageGen);
}
