// URLForge services
// Services provide core functionality: URL assembly, state persistence,
// QR rendering, and clipboard/file export.

pub mod export_service;
pub mod qr_renderer;
pub mod snapshot_store;
pub mod url_assembler;
