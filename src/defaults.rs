//! Default configuration constants for questvox.
//!
//! Shared constants used across configuration and the CLI to keep the
//! defaults in one place.

/// Default language code passed to the synthesis provider (`tl` parameter).
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default Google Translate top-level domain.
///
/// The synthesis endpoint is `translate.google.{tld}/translate_tts`;
/// regional domains can return different voices for the same language.
pub const DEFAULT_TLD: &str = "com";

/// Default timeout for a single synthesis request, in seconds.
///
/// The provider is a network service; without a timeout a stalled request
/// would block all future announcements for the session.
pub const SYNTHESIS_TIMEOUT_SECS: u64 = 30;

/// File name of the persisted audio artifact inside the cache directory.
///
/// Exactly one artifact is kept — the most recently synthesized clip,
/// overwritten on every announcement.
pub const ARTIFACT_FILENAME: &str = "announcement.mp3";
