//! URLForge UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2 (Chromium-based)
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The builder form is rendered as HTML/CSS/JS inside the WebView.
//! Communication between the Rust backend and JS frontend uses wry IPC;
//! all state and all debounce timing live on the Rust side.

pub mod webview_app;
