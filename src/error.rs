// src/error.rs

//! Error types for the recipe pipeline
//!
//! Every failure in the pipeline is fatal: an unsupported configuration, a
//! checksum mismatch on the fetched archive, or a non-zero exit from an
//! external tool all abort the run. Nothing is retried or downgraded.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The platform/toolchain pairing cannot build this package.
    /// Raised before any filesystem or network work.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The fetched archive does not match its pinned SHA-256 digest.
    #[error("sha256 mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// Downloading the source archive failed.
    #[error("download failed: {0}")]
    Download(String),

    /// An external tool step (configure, make, install, tar) exited non-zero.
    #[error("{step} step failed (exit code {code:?}): {stderr}")]
    Tool {
        step: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Malformed digest string, dependency metadata, or settings value.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
