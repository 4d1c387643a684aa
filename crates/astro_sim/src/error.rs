//! Startup-tier errors
//!
//! The per-frame simulation has no fallible paths: all state is bounded
//! and pre-validated, and pool exhaustion is a capacity policy rather
//! than an error. Failures exist only at startup, while acquiring assets
//! and configuration, and they are fatal: the process reports the
//! diagnostic and exits non-zero with no degraded fallback.

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// A model data file could not be opened or read
    #[error("could not read asset file {path}: {source}")]
    Io {
        /// Offending file path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A metadata field was missing or unparseable
    #[error("invalid metadata in {path}: {reason}")]
    Metadata {
        /// Offending file path
        path: String,
        /// What was wrong
        reason: String,
    },

    /// A data file held fewer elements than its metadata promised
    #[error("short read from {path}: expected {expected} elements, got {actual}")]
    ShortRead {
        /// Offending file path
        path: String,
        /// Element count promised by the metadata
        expected: usize,
        /// Element count actually read
        actual: usize,
    },

    /// Stored and computed checksums disagree
    #[error("{kind} checksum mismatch for {path}: got {actual} instead of {expected}")]
    ChecksumMismatch {
        /// Which buffer failed ("index" or "vertex")
        kind: &'static str,
        /// Offending file path
        path: String,
        /// Checksum recorded in the metadata
        expected: String,
        /// Checksum computed from the data
        actual: String,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read
    #[error("could not read configuration {path}: {source}")]
    Io {
        /// Offending file path
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::SimConfig`]
    #[error("malformed configuration {path}: {source}")]
    Parse {
        /// Offending file path
        path: String,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}
