//! # Error Handling
//!
//! Centralized error type for the `git-mirror` library, built with
//! `thiserror`. URL-resolution failures are non-recoverable for the single
//! input that produced them; callers decide whether to skip the entry or
//! abort. Subprocess and I/O failures from the collaborator layer are
//! surfaced unchanged and abort the surrounding operation.

use thiserror::Error;

/// Main error type for git-mirror operations
#[derive(Error, Debug)]
pub enum Error {
    /// The given string matched none of the supported URL shapes
    /// (SSH shorthand, scheme URL, or existing local mirror path).
    #[error("Unsupported URL format: {url}")]
    UnrecognizedUrl { url: String },

    /// A scheme URL carried an empty authority component.
    #[error("Missing host in URL: {url}")]
    MissingHost { url: String },

    /// The repository path portion of a URL yielded no usable segments.
    #[error("Cannot parse repository path from: {path}")]
    MalformedPath { path: String },

    /// A local path was given that exists but is not a mirror directory.
    #[error("Local path is not a mirror directory: {path}")]
    NotAMirrorPath { path: String },

    /// An on-disk mirror does not follow the `<host>/<path...>` layout
    /// relative to the base directory.
    #[error("Mirror directory does not follow <host>/<path> layout: {path}")]
    MirrorLayout { path: String },

    /// `git clone --mirror` failed for an upstream URL.
    #[error("Git clone error for {url}: {message}")]
    GitClone { url: String, message: String },

    /// A git subprocess exited with a non-zero status.
    #[error("Git command failed ({command}): {stderr}")]
    GitCommand { command: String, stderr: String },

    /// The gitolite-admin checkout is missing expected structure
    /// (e.g. `conf/gitolite.conf` or the managed document).
    #[error("Unexpected gitolite-admin layout: {message}")]
    AdminLayout { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings-file error, wrapped from `rust-ini`.
    #[error("Settings file error: {0}")]
    Settings(#[from] ini::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
