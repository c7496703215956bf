//! Controller pipeline tests: sentinels, length gating, persistence ordering,
//! restore, and the copy/download guards.

use std::sync::{Arc, Mutex};

use urlforge::app::App;
use urlforge::managers::param_store::ParamStoreTrait;
use urlforge::services::export_service::{Clipboard, ExportService};
use urlforge::services::qr_renderer::QR_URL_LIMIT;
use urlforge::types::builder::{QrOutcome, SnapshotParam, EMPTY_BASE_PROMPT, PLACEHOLDER_TEXT};
use urlforge::types::errors::ExportError;

fn seed(key: &str, value: &str) -> SnapshotParam {
    SnapshotParam {
        key: key.to_string(),
        value: value.to_string(),
        encode: true,
    }
}

/// Base URL whose assembled form (no params) has exactly `len` characters.
fn base_of_len(len: usize) -> String {
    format!("http://{}", "a".repeat(len - 7))
}

struct RecordingClipboard {
    written: Arc<Mutex<Vec<String>>>,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, contents: &str) -> Result<(), ExportError> {
        self.written.lock().unwrap().push(contents.to_string());
        Ok(())
    }
}

fn app_with_recording_clipboard() -> (App, Arc<Mutex<Vec<String>>>) {
    let mut app = App::new(":memory:").unwrap();
    let written = Arc::new(Mutex::new(Vec::new()));
    app.export_service = ExportService::with_clipboard(Box::new(RecordingClipboard {
        written: written.clone(),
    }));
    (app, written)
}

// ─── Startup / defaults ───

#[test]
fn test_initial_view_shows_placeholder() {
    let app = App::new(":memory:").unwrap();
    assert_eq!(app.view().url_text, PLACEHOLDER_TEXT);
    assert_eq!(app.view().qr, QrOutcome::Cleared);
}

#[test]
fn test_startup_without_snapshot_gives_one_blank_row() {
    let mut app = App::new(":memory:").unwrap();
    app.startup();
    assert_eq!(app.base_url, "");
    assert_eq!(app.params.len(), 1);
    assert_eq!(app.params.entries()[0].key, "");
    assert!(app.params.entries()[0].encode);
}

#[test]
fn test_startup_with_empty_base_shows_prompt_and_no_qr() {
    let mut app = App::new(":memory:").unwrap();
    app.startup();
    assert_eq!(app.view().url_text, EMPTY_BASE_PROMPT);
    assert_eq!(app.view().qr, QrOutcome::Cleared);
}

// ─── Recompute pipeline ───

#[test]
fn test_refresh_assembles_and_renders() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url("https://example.com");
    app.params.add(Some(seed("q", "a b")));

    let view = app.refresh();
    assert_eq!(view.url_text, "https://example.com?q=a%20b");
    assert!(matches!(view.qr, QrOutcome::Image(data_url) if data_url.starts_with("data:image/png;base64,")));
}

#[test]
fn test_refresh_with_empty_base_clears_qr() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url("https://example.com");
    app.refresh();

    app.set_base_url("   ");
    let view = app.refresh();
    assert_eq!(view.url_text, EMPTY_BASE_PROMPT);
    assert_eq!(view.qr, QrOutcome::Cleared);
}

#[test]
fn test_url_at_limit_still_renders_qr() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url(&base_of_len(QR_URL_LIMIT));

    let view = app.refresh();
    assert_eq!(view.url_text.chars().count(), QR_URL_LIMIT);
    assert!(matches!(view.qr, QrOutcome::Image(_)));
}

#[test]
fn test_url_over_limit_suppresses_qr_but_shows_full_text() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url(&base_of_len(QR_URL_LIMIT + 1));

    let view = app.refresh();
    assert_eq!(view.qr, QrOutcome::TooLong);
    assert_eq!(
        view.url_text.chars().count(),
        QR_URL_LIMIT + 1,
        "the text URL is still shown in full"
    );
}

#[test]
fn test_refresh_is_idempotent() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url("https://example.com");
    app.params.add(Some(seed("a", "1")));

    let first = app.refresh();
    let second = app.refresh();
    assert_eq!(first, second);
}

#[test]
fn test_refresh_survives_persistence_failure() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url("https://example.com");

    // Break the storage layer; the recompute must still produce its view.
    app.db
        .connection()
        .execute("DROP TABLE storage_slots", [])
        .unwrap();

    let view = app.refresh();
    assert_eq!(view.url_text, "https://example.com");
    assert!(matches!(view.qr, QrOutcome::Image(_)));
}

// ─── Persistence across sessions ───

#[test]
fn test_state_restores_across_app_instances() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("urlforge.db");
    let db_path = db_path.to_str().unwrap();

    {
        let mut app = App::new(db_path).unwrap();
        app.startup();
        app.set_base_url("https://example.com");
        app.params.replace_all(vec![seed("a", "1"), seed("b", "2")]);
        app.refresh();
        app.shutdown();
    }

    let mut app = App::new(db_path).unwrap();
    app.startup();
    assert_eq!(app.base_url, "https://example.com");
    let keys: Vec<&str> = app.params.entries().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(app.view().url_text, "https://example.com?a=1&b=2");
}

#[test]
fn test_removing_first_row_persists_without_gaps() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("urlforge.db");
    let db_path = db_path.to_str().unwrap();

    {
        let mut app = App::new(db_path).unwrap();
        app.startup();
        app.set_base_url("https://example.com");
        app.params
            .replace_all(vec![seed("a", "1"), seed("b", "2"), seed("c", "3")]);
        app.params.remove_at(0).unwrap();
        app.refresh();
    }

    let mut app = App::new(db_path).unwrap();
    app.startup();
    let keys: Vec<&str> = app.params.entries().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["b", "c"], "remaining rows keep their relative order");
}

#[test]
fn test_blank_rows_are_not_restored() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("urlforge.db");
    let db_path = db_path.to_str().unwrap();

    {
        let mut app = App::new(db_path).unwrap();
        app.startup();
        app.set_base_url("https://example.com");
        app.params.replace_all(vec![seed("a", "1")]);
        app.params.add(None); // blank row, dropped on save
        app.refresh();
    }

    let mut app = App::new(db_path).unwrap();
    app.startup();
    assert_eq!(app.params.len(), 1);
    assert_eq!(app.params.entries()[0].key, "a");
}

// ─── Copy / download ───

#[test]
fn test_copy_before_any_url_is_rejected() {
    let (mut app, written) = app_with_recording_clipboard();
    let result = app.copy_current_url();
    assert!(matches!(result, Err(ExportError::NothingToCopy)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_copy_with_empty_base_is_rejected() {
    let (mut app, written) = app_with_recording_clipboard();
    app.startup();
    assert!(matches!(
        app.copy_current_url(),
        Err(ExportError::NothingToCopy)
    ));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_copy_after_refresh_writes_displayed_url() {
    let (mut app, written) = app_with_recording_clipboard();
    app.set_base_url("https://example.com");
    app.params.add(Some(seed("q", "1")));
    app.refresh();

    app.copy_current_url().unwrap();
    assert_eq!(*written.lock().unwrap(), vec!["https://example.com?q=1"]);
}

#[test]
fn test_download_without_rendered_qr_errors() {
    let mut app = App::new(":memory:").unwrap();
    let tmp = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        app.download_qr(tmp.path()),
        Err(ExportError::NoImage)
    ));
}

#[test]
fn test_download_after_render_writes_png() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url("https://example.com");
    app.refresh();

    let tmp = tempfile::TempDir::new().unwrap();
    let path = app.download_qr(tmp.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "url-qrcode.png");

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn test_oversized_url_clears_downloadable_image() {
    let mut app = App::new(":memory:").unwrap();
    app.set_base_url("https://example.com");
    app.refresh();

    app.set_base_url(&base_of_len(QR_URL_LIMIT + 1));
    app.refresh();

    let tmp = tempfile::TempDir::new().unwrap();
    assert!(matches!(
        app.download_qr(tmp.path()),
        Err(ExportError::NoImage)
    ));
}
