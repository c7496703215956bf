//! WebView-based builder application using `wry` + `tao`.
//!
//! Architecture:
//! - A single window hosting one inline HTML page (no navigation).
//! - IPC from JS → Rust via `window.ipc.postMessage()`; every message names a
//!   method from the dispatch table in `rpc_handler`.
//! - The page owns no state: typing posts the edit immediately, Rust notes
//!   the input stream in the debounce scheduler, and the recompute fires when
//!   the stream's deadline elapses. `ControlFlow::WaitUntil` wakes the event
//!   loop at the earliest pending deadline.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use crate::app::App;
use crate::managers::debounce::DebounceSchedulerTrait;
use crate::rpc_handler::{self, state_to_json, view_to_json};

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const BUILDER_CSS: &str = include_str!("../../resources/ui/builder.css");
const BUILDER_JS: &str = include_str!("../../resources/ui/builder.js");

/// Build the single-page builder HTML with styles and script inlined.
fn builder_page() -> String {
    let body = r#"<div class="container">
<h1>URL Builder</h1>
<div class="section">
<label for="baseUrl">Base URL</label>
<input type="text" id="baseUrl" placeholder="https://example.com/path" autofocus>
</div>
<div class="section">
<div class="section-head">
<label>Query Parameters</label>
<button id="addParam" class="btn">+ Add Parameter</button>
</div>
<div id="paramsContainer"></div>
</div>
<div class="section">
<div class="section-head">
<label>Generated URL</label>
<div>
<button id="generateUrl" class="btn">Generate</button>
<button id="copyUrl" class="btn">Copy</button>
</div>
</div>
<div id="generatedUrl" class="url-output">URL will appear here</div>
</div>
<div class="section">
<div class="section-head">
<label>QR Code</label>
<button id="downloadQR" class="btn">Download PNG</button>
</div>
<div id="qrcode"></div>
</div>
</div>"#;

    let mut html = String::with_capacity(
        body.len() + BUILDER_CSS.len() + BUILDER_JS.len() + 256,
    );
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><style>");
    html.push_str(BUILDER_CSS);
    html.push_str("</style></head><body>");
    html.push_str(body);
    html.push_str("<script>");
    html.push_str(BUILDER_JS);
    html.push_str("</script></body></html>");
    html
}

fn render_state_script(app: &App) -> String {
    format!("window.__uf_render({})", state_to_json(app))
}

fn render_view_script(app: &App) -> String {
    format!("window.__uf_render_view({})", view_to_json(app.view()))
}

/// Route one IPC message through the dispatch table.
///
/// Messages carry `{method, params, debounce?}`. When `debounce` names an
/// input stream, the edit is applied immediately but the recompute waits for
/// the stream's inactivity window; otherwise mutating methods recompute and
/// re-render right away.
fn handle_ipc(state: &Mutex<App>, body: &str) -> Option<UserEvent> {
    let msg: serde_json::Value = serde_json::from_str(body).ok()?;
    let method = msg.get("method")?.as_str()?.to_string();
    let params = msg
        .get("params")
        .cloned()
        .unwrap_or(serde_json::Value::Null);
    let stream = msg.get("debounce").and_then(|v| v.as_str());

    if method == "ui_ready" {
        let a = state.lock().ok()?;
        return Some(UserEvent::EvalScript(render_state_script(&a)));
    }

    let result = rpc_handler::handle_method(state, &method, &params);
    if let Err(e) = &result {
        eprintln!("[IPC] {} failed: {}", method, e);
    }

    if let Some(stream) = stream {
        // Debounced edit: recompute when the stream goes quiet.
        let mut a = state.lock().ok()?;
        a.debounce.note_input(stream, Instant::now());
        return None;
    }

    match method.as_str() {
        // Row set changed: rebuild the form, and recompute after removals
        // (removing a row changes the URL; adding a blank one does not).
        "param.add" => {
            let a = state.lock().ok()?;
            Some(UserEvent::EvalScript(render_state_script(&a)))
        }
        "param.remove" => {
            let mut a = state.lock().ok()?;
            a.refresh();
            Some(UserEvent::EvalScript(render_state_script(&a)))
        }
        "url.generate" => {
            let a = state.lock().ok()?;
            Some(UserEvent::EvalScript(render_view_script(&a)))
        }
        "url.copy" => {
            let value = result.ok()?;
            Some(UserEvent::EvalScript(format!(
                "window.__uf_copy_result({})",
                value
            )))
        }
        "qr.download" => {
            let value = result.ok()?;
            Some(UserEvent::EvalScript(format!(
                "window.__uf_download_result({})",
                value
            )))
        }
        _ => None,
    }
}

// ─── Main entry point ───

pub fn run() {
    let data_dir = crate::platform::get_data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("[INIT] failed to create data dir: {}", e);
    }
    let db_path = data_dir.join("urlforge.db");

    let mut app =
        App::new(&db_path.to_string_lossy()).expect("Failed to initialize URLForge");
    app.startup();
    let state = Arc::new(Mutex::new(app));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("URLForge")
        .with_inner_size(tao::dpi::LogicalSize::new(720.0, 860.0))
        .build(&event_loop)
        .expect("Failed to create window");

    let ipc_state = state.clone();
    let ipc_proxy = proxy.clone();

    let builder = WebViewBuilder::new()
        .with_html(builder_page())
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            if let Some(event) = handle_ipc(&ipc_state, body) {
                let _ = ipc_proxy.send_event(event);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().expect("Failed to get GTK vbox");
        builder.build_gtk(vbox).expect("Failed to create WebView")
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).expect("Failed to create WebView");

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                let mut s = state.lock().unwrap();
                s.shutdown();
                *control_flow = ControlFlow::Exit;
                return;
            }

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                let _ = webview.evaluate_script(&js);
            }

            _ => {}
        }

        // Fire any input streams whose inactivity window has elapsed, then
        // park the loop until the next pending deadline.
        let (fired_js, next_deadline) = {
            let mut s = state.lock().unwrap();
            let due = s.debounce.drain_due(Instant::now());
            let js = if due.is_empty() {
                None
            } else {
                s.refresh();
                Some(render_view_script(&s))
            };
            (js, s.debounce.next_deadline())
        };
        if let Some(js) = fired_js {
            let _ = webview.evaluate_script(&js);
        }
        *control_flow = match next_deadline {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}
