//! Clipboard and file export for URLForge.
//!
//! The clipboard sits behind a trait so tests can inject a double and so the
//! system clipboard is only initialized on first use. Failures here never
//! block further use of the tool: the caller logs and falls back (manual
//! selection in the page for copy, nothing for download).

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::builder::is_copyable;
use crate::types::errors::ExportError;

/// Fixed filename for the exported QR image.
pub const QR_EXPORT_FILENAME: &str = "url-qrcode.png";

/// How long the copy-confirmation state is shown before reverting.
pub const COPY_CONFIRM_MS: u64 = 2000;

/// Clipboard abstraction for URL copying.
pub trait Clipboard: Send {
    fn set_text(&mut self, contents: &str) -> Result<(), ExportError>;
}

/// System clipboard using arboard, initialized lazily on first copy.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, ExportError> {
        if self.inner.is_none() {
            self.inner = Some(
                arboard::Clipboard::new()
                    .map_err(|e| ExportError::ClipboardUnavailable(e.to_string()))?,
            );
        }
        Ok(self.inner.as_mut().expect("clipboard just initialized"))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, contents: &str) -> Result<(), ExportError> {
        let clipboard = self.ensure()?;
        clipboard
            .set_text(contents.to_string())
            .map_err(|e| ExportError::ClipboardRejected(e.to_string()))
    }
}

/// Trait defining the export interface.
pub trait ExportServiceTrait {
    fn copy_url(&mut self, display_text: &str) -> Result<(), ExportError>;
    fn save_qr_png(&self, png: &[u8], dir: &Path) -> Result<PathBuf, ExportError>;
}

/// Export service bridging the clipboard and the download directory.
pub struct ExportService {
    clipboard: Box<dyn Clipboard>,
}

impl ExportService {
    pub fn new() -> Self {
        Self::with_clipboard(Box::new(SystemClipboard::new()))
    }

    /// Creates a service with an injected clipboard (used by tests).
    pub fn with_clipboard(clipboard: Box<dyn Clipboard>) -> Self {
        Self { clipboard }
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportServiceTrait for ExportService {
    /// Copies the displayed URL to the clipboard.
    ///
    /// Placeholder and notice strings are rejected before touching the
    /// clipboard. Clipboard failures are returned to the caller, which maps
    /// them to the manual-selection fallback and a log line.
    fn copy_url(&mut self, display_text: &str) -> Result<(), ExportError> {
        if !is_copyable(display_text) {
            return Err(ExportError::NothingToCopy);
        }
        self.clipboard.set_text(display_text)
    }

    /// Writes the rendered QR PNG into `dir` under the fixed export filename,
    /// creating the directory if needed.
    fn save_qr_png(&self, png: &[u8], dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|e| ExportError::FileSystemError(e.to_string()))?;
        let path = dir.join(QR_EXPORT_FILENAME);
        fs::write(&path, png).map_err(|e| ExportError::FileSystemError(e.to_string()))?;
        Ok(path)
    }
}
