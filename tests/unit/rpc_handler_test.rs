//! Unit tests for the event dispatcher — every UI event routed by
//! `handle_method`, exercised headlessly against a temp-database App.

use std::sync::Mutex;

use serde_json::json;
use tempfile::TempDir;

use urlforge::app::App;
use urlforge::rpc_handler::handle_method;
use urlforge::types::builder::{EMPTY_BASE_PROMPT, TOO_LONG_NOTICE};

/// Create a fresh App backed by a temp directory DB.
fn setup() -> (Mutex<App>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let mut app = App::new(db_path.to_str().unwrap()).expect("Failed to init App");
    app.startup();
    (Mutex::new(app), tmp)
}

// ─── Ping / unknown ───

#[test]
fn test_ping() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "ping", &json!({})).unwrap();
    assert_eq!(res, json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.is_err());
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── State ───

#[test]
fn test_state_get_shape() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "state.get", &json!({})).unwrap();

    assert_eq!(res["baseUrl"], "");
    assert_eq!(res["params"].as_array().unwrap().len(), 1);
    assert_eq!(res["params"][0]["encode"], true);
    assert!(res["params"][0]["id"].is_string());
    assert_eq!(res["view"]["urlText"], EMPTY_BASE_PROMPT);
    assert_eq!(res["view"]["qr"]["kind"], "cleared");
}

#[test]
fn test_base_set() {
    let (app, _tmp) = setup();
    handle_method(&app, "base.set", &json!({"value": "https://example.com"})).unwrap();
    let res = handle_method(&app, "state.get", &json!({})).unwrap();
    assert_eq!(res["baseUrl"], "https://example.com");
}

#[test]
fn test_base_set_missing_value_errors() {
    let (app, _tmp) = setup();
    assert!(handle_method(&app, "base.set", &json!({})).is_err());
}

// ─── Parameter rows ───

#[test]
fn test_param_add_returns_id() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "param.add", &json!({"key": "q", "value": "1"})).unwrap();
    assert!(res["id"].is_string());

    let state = handle_method(&app, "state.get", &json!({})).unwrap();
    assert_eq!(state["params"].as_array().unwrap().len(), 2);
    assert_eq!(state["params"][1]["key"], "q");
}

#[test]
fn test_param_add_defaults_encode_true() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "param.add", &json!({})).unwrap();
    let id = res["id"].as_str().unwrap();

    let state = handle_method(&app, "state.get", &json!({})).unwrap();
    let added = state["params"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id)
        .unwrap();
    assert_eq!(added["encode"], true);
}

#[test]
fn test_param_update_by_id() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "param.add", &json!({})).unwrap();
    let id = res["id"].as_str().unwrap().to_string();

    handle_method(
        &app,
        "param.update",
        &json!({"id": id, "key": "q", "value": "rust", "encode": false}),
    )
    .unwrap();

    let state = handle_method(&app, "state.get", &json!({})).unwrap();
    let updated = state["params"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id.as_str())
        .unwrap();
    assert_eq!(updated["key"], "q");
    assert_eq!(updated["value"], "rust");
    assert_eq!(updated["encode"], false);
}

#[test]
fn test_param_update_unknown_id_errors() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "param.update", &json!({"id": "missing", "key": "x"}));
    assert!(res.is_err());
}

#[test]
fn test_param_update_missing_id_errors() {
    let (app, _tmp) = setup();
    assert!(handle_method(&app, "param.update", &json!({"key": "x"})).is_err());
}

#[test]
fn test_param_remove_by_id() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "param.add", &json!({"key": "extra"})).unwrap();
    let id = res["id"].as_str().unwrap().to_string();

    handle_method(&app, "param.remove", &json!({"id": id})).unwrap();
    let state = handle_method(&app, "state.get", &json!({})).unwrap();
    assert_eq!(state["params"].as_array().unwrap().len(), 1);
}

#[test]
fn test_param_remove_by_position() {
    let (app, _tmp) = setup();
    handle_method(&app, "param.add", &json!({"key": "second"})).unwrap();

    handle_method(&app, "param.remove", &json!({"position": 0})).unwrap();
    let state = handle_method(&app, "state.get", &json!({})).unwrap();
    let params = state["params"].as_array().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0]["key"], "second");
}

#[test]
fn test_param_remove_without_target_errors() {
    let (app, _tmp) = setup();
    assert!(handle_method(&app, "param.remove", &json!({})).is_err());
}

// ─── Output ───

#[test]
fn test_url_generate_view() {
    let (app, _tmp) = setup();
    handle_method(&app, "base.set", &json!({"value": "https://example.com"})).unwrap();
    handle_method(&app, "param.add", &json!({"key": "q", "value": "a b"})).unwrap();

    let view = handle_method(&app, "url.generate", &json!({})).unwrap();
    assert_eq!(view["urlText"], "https://example.com?q=a%20b");
    assert_eq!(view["qr"]["kind"], "image");
    assert!(view["qr"]["dataUrl"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[test]
fn test_url_generate_too_long_view() {
    let (app, _tmp) = setup();
    let base = format!("http://{}", "a".repeat(1200));
    handle_method(&app, "base.set", &json!({"value": base})).unwrap();

    let view = handle_method(&app, "url.generate", &json!({})).unwrap();
    assert_eq!(view["qr"]["kind"], "too_long");
    assert_eq!(view["qr"]["notice"], TOO_LONG_NOTICE);
    assert_eq!(view["urlText"].as_str().unwrap().len(), 1207);
}

#[test]
fn test_url_copy_with_nothing_to_copy() {
    let (app, _tmp) = setup();
    // Nothing generated yet: the guard rejects before touching the clipboard.
    let res = handle_method(&app, "url.copy", &json!({})).unwrap();
    assert_eq!(res["ok"], false);
    assert_eq!(res["reason"], "nothing");
}

#[test]
fn test_qr_download_without_image() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "qr.download", &json!({})).unwrap();
    assert_eq!(res["ok"], false);
    assert_eq!(res["reason"], "no_image");
}

#[test]
fn test_qr_download_writes_file_into_requested_dir() {
    let (app, tmp) = setup();
    handle_method(&app, "base.set", &json!({"value": "https://example.com"})).unwrap();
    handle_method(&app, "url.generate", &json!({})).unwrap();

    let dir = tmp.path().join("downloads");
    let res = handle_method(
        &app,
        "qr.download",
        &json!({"dir": dir.to_str().unwrap()}),
    )
    .unwrap();
    assert_eq!(res["ok"], true);

    let path = std::path::PathBuf::from(res["path"].as_str().unwrap());
    assert!(path.exists());
    assert_eq!(path.file_name().unwrap(), "url-qrcode.png");
}
