//! Path utilities for the Zellij sandbox environment.
//!
//! In the Zellij plugin sandbox the host filesystem is mounted under `/host`.
//! This module pins down where the plugin keeps its persistent data (the
//! favorites blob and trace files).

use std::path::PathBuf;

/// Returns the data directory for Zibrary storage.
///
/// The directory is located at `/host/.local/share/zellij/zibrary` in the
/// Zellij sandbox. `/host` points to the cwd of the last focused terminal, or
/// the folder where Zellij was started if that's not available, so this
/// typically resolves to `~/.local/share/zellij/zibrary` when Zellij is
/// started from a home directory terminal.
///
/// The favorites blob `favorites.json` and the OTLP trace file live within
/// this directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zibrary")
}
