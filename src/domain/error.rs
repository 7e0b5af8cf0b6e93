//! Error types for the Zibrary plugin.
//!
//! This module defines the centralized error type [`ZibraryError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Note that most failure points in this plugin deliberately degrade instead of
//! propagating: a failed catalog fetch settles as an ignored outcome and a failed
//! favorites write leaves the in-memory shelf intact. These types cover the seams
//! where an error is still worth naming (storage backends, theme files, worker
//! communication, configuration).

use thiserror::Error;

/// The main error type for Zibrary plugin operations.
///
/// This enum consolidates the error conditions that can occur during plugin
/// execution, from storage operations to I/O failures and configuration issues.
/// Variants wrap underlying errors from external crates using `#[from]` where a
/// direct conversion exists.
#[derive(Debug, Error)]
pub enum ZibraryError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the favorites backend fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when the plugin cannot talk to its background worker thread,
    /// typically during favorites operations. The string contains details about
    /// the communication failure.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog request could not be constructed.
    ///
    /// Occurs when the configured API base URL cannot be combined with the
    /// search query into a valid request URL.
    #[error("Catalog API error: {0}")]
    Api(String),
}

/// A specialized `Result` type for Zibrary operations.
///
/// This is a type alias for `std::result::Result<T, ZibraryError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, ZibraryError>;
