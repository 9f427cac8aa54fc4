//! questvox - Spoken quest announcements from a game memory reader
//!
//! Launches an external game-memory-reading process, watches its JSON
//! line output for quest descriptions, and speaks them aloud via a
//! cloud text-to-speech service.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod announcer;
pub mod app;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod playback;
pub mod reader;
pub mod record;
pub mod tts;

// Core seams (source → announce → speak)
pub use playback::{AudioPlayer, RodioPlayer};
pub use reader::GameReader;
pub use tts::{GoogleTranslateSynthesizer, SpeechSynthesizer};

// Announcement loop
pub use announcer::{Announcer, AnnouncerStats};
pub use record::extract_announcement;

// Error handling
pub use error::{QuestvoxError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
