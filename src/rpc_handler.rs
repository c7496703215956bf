//! Event dispatch for URLForge.
//!
//! The explicit event-to-action mapping: every UI event arrives as a method
//! name plus JSON params and maps to exactly one controller action. Kept out
//! of the webview layer so the whole table is unit-testable headlessly.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::param_store::ParamStoreTrait;
use crate::services::export_service::COPY_CONFIRM_MS;
use crate::types::builder::{
    OutputView, ParamPatch, QrOutcome, SnapshotParam, QR_FAILURE_PREFIX, TOO_LONG_NOTICE,
};
use crate::types::errors::ExportError;

/// Serializes an output view for the page.
pub fn view_to_json(view: &OutputView) -> Value {
    let qr = match &view.qr {
        QrOutcome::Cleared => json!({"kind": "cleared"}),
        QrOutcome::TooLong => json!({"kind": "too_long", "notice": TOO_LONG_NOTICE}),
        QrOutcome::Failed(msg) => json!({
            "kind": "failed",
            "message": format!("{}: {}", QR_FAILURE_PREFIX, msg),
        }),
        QrOutcome::Image(data_url) => json!({"kind": "image", "dataUrl": data_url}),
    };
    json!({"urlText": view.url_text, "qr": qr})
}

/// Serializes the full builder state, row ids included, for the page.
pub fn state_to_json(app: &App) -> Value {
    let params: Vec<Value> = app
        .params
        .entries()
        .iter()
        .map(|e| json!({"id": e.id, "key": e.key, "value": e.value, "encode": e.encode}))
        .collect();
    json!({
        "baseUrl": app.base_url,
        "params": params,
        "view": view_to_json(app.view()),
    })
}

fn patch_from_params(params: &Value) -> ParamPatch {
    ParamPatch {
        key: params.get("key").and_then(|v| v.as_str()).map(String::from),
        value: params
            .get("value")
            .and_then(|v| v.as_str())
            .map(String::from),
        encode: params.get("encode").and_then(|v| v.as_bool()),
    }
}

/// Dispatch a UI event to the appropriate controller action.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// No event can poison the app: handler errors are plain strings and the
/// page stays interactive.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── State ───
        "state.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(state_to_json(&a))
        }
        "base.set" => {
            let value = params
                .get("value")
                .and_then(|v| v.as_str())
                .ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.set_base_url(value);
            Ok(json!({"ok": true}))
        }

        // ─── Parameter rows ───
        "param.add" => {
            let seed = SnapshotParam {
                key: params
                    .get("key")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                value: params
                    .get("value")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                encode: params.get("encode").and_then(|v| v.as_bool()).unwrap_or(true),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let id = a.params.add(Some(seed));
            Ok(json!({"id": id}))
        }
        "param.update" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let patch = patch_from_params(params);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.params.update(id, patch).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "param.remove" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if let Some(id) = params.get("id").and_then(|v| v.as_str()) {
                a.params.remove(id).map_err(|e| e.to_string())?;
            } else if let Some(position) = params.get("position").and_then(|v| v.as_u64()) {
                a.params
                    .remove_at(position as usize)
                    .map_err(|e| e.to_string())?;
            } else {
                return Err("missing id or position".to_string());
            }
            Ok(json!({"ok": true}))
        }

        // ─── Output ───
        "url.generate" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let view = a.refresh();
            Ok(view_to_json(&view))
        }
        "url.copy" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            match a.copy_current_url() {
                Ok(()) => Ok(json!({"ok": true, "confirmMs": COPY_CONFIRM_MS})),
                Err(ExportError::NothingToCopy) => {
                    Ok(json!({"ok": false, "reason": "nothing"}))
                }
                // Unavailable/rejected clipboard: the page falls back to
                // manual selection; already logged by the controller.
                Err(ExportError::ClipboardUnavailable(_))
                | Err(ExportError::ClipboardRejected(_)) => {
                    Ok(json!({"ok": false, "reason": "fallback"}))
                }
                Err(e) => Err(e.to_string()),
            }
        }
        "qr.download" => {
            let dir = params
                .get("dir")
                .and_then(|v| v.as_str())
                .map(std::path::PathBuf::from)
                .unwrap_or_else(crate::platform::get_download_dir);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            match a.download_qr(&dir) {
                Ok(path) => Ok(json!({"ok": true, "path": path.to_string_lossy()})),
                Err(ExportError::NoImage) => Ok(json!({"ok": false, "reason": "no_image"})),
                Err(e) => Err(e.to_string()),
            }
        }

        "ping" => Ok(json!({"pong": true})),

        _ => Err(format!("unknown method: {}", method)),
    }
}
