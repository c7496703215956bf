use std::fmt;

// === ParamError ===

/// Errors related to parameter row operations.
#[derive(Debug)]
pub enum ParamError {
    /// Row with the given ID was not found.
    NotFound(String),
    /// The provided row position is out of bounds.
    InvalidIndex(usize),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NotFound(id) => write!(f, "Parameter row not found: {}", id),
            ParamError::InvalidIndex(index) => write!(f, "Invalid row position: {}", index),
        }
    }
}

impl std::error::Error for ParamError {}

// === StorageError ===

/// Errors related to the persisted builder state slot.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// Failed to serialize or deserialize the snapshot.
    SerializationError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Snapshot serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === QrError ===

/// Errors related to QR image rendering.
#[derive(Debug)]
pub enum QrError {
    /// The input could not be encoded as a QR symbol.
    Unencodable(String),
    /// The rendered matrix could not be written as a PNG image.
    ImageEncoding(String),
}

impl fmt::Display for QrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrError::Unencodable(msg) => write!(f, "QR encoding failed: {}", msg),
            QrError::ImageEncoding(msg) => write!(f, "QR image encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for QrError {}

// === ExportError ===

/// Errors related to clipboard copy and QR image export.
#[derive(Debug)]
pub enum ExportError {
    /// The display shows a placeholder or notice, not a copyable URL.
    NothingToCopy,
    /// The system clipboard could not be initialized.
    ClipboardUnavailable(String),
    /// The clipboard rejected the write.
    ClipboardRejected(String),
    /// There is no rendered QR image to export.
    NoImage,
    /// Writing the exported file failed.
    FileSystemError(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::NothingToCopy => write!(f, "No generated URL to copy"),
            ExportError::ClipboardUnavailable(msg) => {
                write!(f, "Clipboard unavailable: {}", msg)
            }
            ExportError::ClipboardRejected(msg) => write!(f, "Clipboard write failed: {}", msg),
            ExportError::NoImage => write!(f, "No QR image has been rendered"),
            ExportError::FileSystemError(msg) => write!(f, "Export file system error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}
