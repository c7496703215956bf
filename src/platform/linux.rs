// URLForge platform paths for Linux
// Data:      ~/.local/share/urlforge
// Downloads: $XDG_DOWNLOAD_DIR or ~/Downloads

use std::env;
use std::path::PathBuf;

/// Returns the data directory for URLForge on Linux.
/// Uses `$XDG_DATA_HOME/urlforge` if set, otherwise `~/.local/share/urlforge`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("urlforge")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("urlforge")
    }
}

/// Returns the download directory on Linux.
/// Uses `$XDG_DOWNLOAD_DIR` if set, otherwise `~/Downloads`.
pub fn get_download_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DOWNLOAD_DIR") {
        PathBuf::from(xdg)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join("Downloads")
    }
}
