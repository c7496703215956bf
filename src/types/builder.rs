use serde::{Deserialize, Serialize};

/// A single query parameter row as it exists on screen.
///
/// The `id` gives the row a stable identity for event routing while rows are
/// added and removed around it; it is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEntry {
    pub id: String,
    pub key: String,
    pub value: String,
    pub encode: bool,
}

/// The persisted form of one parameter row.
///
/// Also used to seed new rows on add/restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotParam {
    pub key: String,
    pub value: String,
    pub encode: bool,
}

impl SnapshotParam {
    /// True when both key and value are empty. Such rows are dropped on save.
    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

impl Default for SnapshotParam {
    fn default() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            encode: true,
        }
    }
}

impl From<&ParamEntry> for SnapshotParam {
    fn from(entry: &ParamEntry) -> Self {
        Self {
            key: entry.key.clone(),
            value: entry.value.clone(),
            encode: entry.encode,
        }
    }
}

/// The builder state as written to the persisted storage slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuilderSnapshot {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    pub params: Vec<SnapshotParam>,
}

/// Partial update applied to a parameter row. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ParamPatch {
    pub key: Option<String>,
    pub value: Option<String>,
    pub encode: Option<bool>,
}

/// Result of URL assembly.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembly {
    /// The trimmed base URL was empty; there is nothing to build.
    MissingBase,
    /// The assembled URL string.
    Url(String),
}

impl Assembly {
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Assembly::MissingBase => None,
            Assembly::Url(url) => Some(url),
        }
    }
}

/// What the QR area should show after a recompute.
#[derive(Debug, Clone, PartialEq)]
pub enum QrOutcome {
    /// No URL to encode; the QR area is emptied.
    Cleared,
    /// The URL exceeds the render ceiling; a length notice is shown instead.
    TooLong,
    /// Rendering failed; the message is shown inline in the QR area.
    Failed(String),
    /// Rendered QR image as a base64 `data:image/png` URL.
    Image(String),
}

/// Result of one full recompute cycle: the display text plus the QR directive.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputView {
    pub url_text: String,
    pub qr: QrOutcome,
}

/// Shown in the output area before the first recompute.
pub const PLACEHOLDER_TEXT: &str = "URL will appear here";

/// Shown when the trimmed base URL is empty. Not an error — a defined empty state.
pub const EMPTY_BASE_PROMPT: &str = "Please enter a base URL";

/// Shown in the QR area when the URL exceeds the render ceiling.
pub const TOO_LONG_NOTICE: &str = "URL too long to generate QR code";

/// Prefix of the inline QR failure message.
pub const QR_FAILURE_PREFIX: &str = "QR generation failed";

/// True when the display text is an actual assembled URL rather than a
/// placeholder or notice, i.e. safe to hand to the clipboard.
pub fn is_copyable(display_text: &str) -> bool {
    !display_text.is_empty()
        && display_text != PLACEHOLDER_TEXT
        && display_text != EMPTY_BASE_PROMPT
}
