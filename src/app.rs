//! App Core for URLForge.
//!
//! Central struct owning the builder state and all components, running the
//! recompute pipeline and managing application lifecycle.

use std::path::Path;
use std::sync::Arc;

use crate::database::connection::Database;
use crate::managers::debounce::DebounceScheduler;
use crate::managers::param_store::{ParamStore, ParamStoreTrait};
use crate::services::export_service::ExportService;
use crate::services::qr_renderer::{QrRenderer, QR_URL_LIMIT};
use crate::services::snapshot_store::SnapshotStore;
use crate::services::url_assembler;
use crate::types::builder::{
    Assembly, BuilderSnapshot, OutputView, QrOutcome, EMPTY_BASE_PROMPT, PLACEHOLDER_TEXT,
};
use crate::types::errors::ExportError;

/// Central application struct owning the builder state and all components.
///
/// Everything runs on the UI thread; there is no locking below this level.
pub struct App {
    pub db: Arc<Database>,
    pub base_url: String,
    pub params: ParamStore,
    pub snapshot_store: SnapshotStore,
    pub qr_renderer: QrRenderer,
    pub export_service: ExportService,
    pub debounce: DebounceScheduler,
    last_view: OutputView,
    last_png: Option<Vec<u8>>,
}

impl App {
    /// Creates a new App, initializing all components against the database at
    /// `db_path` (`":memory:"` for tests).
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);
        let snapshot_store = SnapshotStore::new(db.clone());

        Ok(Self {
            db,
            base_url: String::new(),
            params: ParamStore::new(),
            snapshot_store,
            qr_renderer: QrRenderer::new(),
            export_service: ExportService::new(),
            debounce: DebounceScheduler::new(),
            last_view: OutputView {
                url_text: PLACEHOLDER_TEXT.to_string(),
                qr: QrOutcome::Cleared,
            },
            last_png: None,
        })
    }

    /// Startup sequence: restore the persisted snapshot (or the empty default
    /// of one blank row) into the builder state, then run the first recompute.
    pub fn startup(&mut self) {
        use crate::services::snapshot_store::SnapshotStoreTrait;

        match self.snapshot_store.load() {
            Some(snapshot) => {
                self.base_url = snapshot.base_url;
                self.params.replace_all(snapshot.params);
            }
            None => {
                self.base_url = String::new();
                self.params.replace_all(Vec::new());
            }
        }

        self.refresh();
    }

    /// Shutdown sequence: one final save of the current state.
    pub fn shutdown(&mut self) {
        use crate::services::snapshot_store::SnapshotStoreTrait;
        let _ = self.snapshot_store.save(&self.snapshot());
    }

    /// Replaces the base URL. The next recompute picks it up.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.to_string();
    }

    /// The current builder state in its persisted shape (unfiltered; the
    /// store drops blank rows on save).
    pub fn snapshot(&self) -> BuilderSnapshot {
        BuilderSnapshot {
            base_url: self.base_url.clone(),
            params: self.params.entries().iter().map(Into::into).collect(),
        }
    }

    /// The view produced by the most recent recompute.
    pub fn view(&self) -> &OutputView {
        &self.last_view
    }

    /// Runs one full recompute cycle over the complete current state:
    /// assemble → sentinel/length gating → QR render → persist.
    ///
    /// Always a full recomputation, never an incremental diff, so cycles may
    /// fire in any order. A persistence failure is logged and does not roll
    /// back the returned view.
    pub fn refresh(&mut self) -> OutputView {
        use crate::services::qr_renderer::QrRendererTrait;
        use crate::services::snapshot_store::SnapshotStoreTrait;

        let view = match url_assembler::assemble(&self.base_url, self.params.entries()) {
            Assembly::MissingBase => {
                self.last_png = None;
                OutputView {
                    url_text: EMPTY_BASE_PROMPT.to_string(),
                    qr: QrOutcome::Cleared,
                }
            }
            Assembly::Url(url) => {
                let qr = if url.chars().count() > QR_URL_LIMIT {
                    self.last_png = None;
                    QrOutcome::TooLong
                } else {
                    match self.qr_renderer.render_png(&url) {
                        Ok(png) => {
                            let data_url = QrRenderer::png_to_data_url(&png);
                            self.last_png = Some(png);
                            QrOutcome::Image(data_url)
                        }
                        Err(e) => {
                            self.last_png = None;
                            QrOutcome::Failed(e.to_string())
                        }
                    }
                };
                OutputView { url_text: url, qr }
            }
        };

        if let Err(e) = self.snapshot_store.save(&self.snapshot()) {
            log::warn!("failed to persist builder state: {}", e);
        }

        self.last_view = view.clone();
        view
    }

    /// Copies the currently displayed URL to the clipboard.
    ///
    /// Rejects placeholder/notice display strings. Clipboard failures are
    /// logged here and returned so the UI can offer the manual fallback;
    /// nothing is ever shown as a user-facing error dialog.
    pub fn copy_current_url(&mut self) -> Result<(), ExportError> {
        use crate::services::export_service::ExportServiceTrait;

        let text = self.last_view.url_text.clone();
        self.export_service.copy_url(&text).inspect_err(|e| {
            log::warn!("copy failed: {}", e);
        })
    }

    /// Writes the most recently rendered QR image into `dir` under the fixed
    /// export filename. Errors when no image is currently rendered.
    pub fn download_qr(&mut self, dir: &Path) -> Result<std::path::PathBuf, ExportError> {
        use crate::services::export_service::ExportServiceTrait;

        let png = self.last_png.as_ref().ok_or(ExportError::NoImage)?;
        self.export_service.save_qr_png(png, dir).inspect_err(|e| {
            log::warn!("QR export failed: {}", e);
        })
    }
}
