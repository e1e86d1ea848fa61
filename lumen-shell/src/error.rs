//! Error types for Lumen Shell

use std::path::PathBuf;
use thiserror::Error;

/// Settings file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Launcher file and application start errors
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed launcher entries in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize launcher entries: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("launcher entry needs a {0}")]
    MissingField(&'static str),

    #[error("no launcher entry at position {0}")]
    NoSuchEntry(usize),

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Weather service errors
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no weather API key configured")]
    MissingApiKey,

    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("weather service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected weather response: {0}")]
    Malformed(String),

    #[error("icon cache error: {0}")]
    Cache(#[from] std::io::Error),

    #[error("icon decode failed: {0}")]
    Decode(#[from] image::ImageError),
}
