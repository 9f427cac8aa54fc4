//! Error types for questvox.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestvoxError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Reader process errors — fatal: there is no data source without the reader
    #[error("Failed to launch reader {path}: {message}")]
    ReaderLaunch { path: String, message: String },

    #[error("Reader process error: {message}")]
    Reader { message: String },

    // Per-line errors — contained to the offending line
    #[error("Invalid UTF-8 in record: {message}")]
    RecordDecode { message: String },

    #[error("Invalid JSON in record: {0}")]
    RecordParse(#[from] serde_json::Error),

    // Speech synthesis errors
    #[error("Speech synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("Speech synthesis request failed: {0}")]
    SynthesisRequest(#[from] reqwest::Error),

    // Playback errors
    #[error("Audio playback failed: {message}")]
    Playback { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, QuestvoxError>;
