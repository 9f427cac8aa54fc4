use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub reader: ReaderConfig,
    pub tts: TtsConfig,
    pub playback: PlaybackConfig,
}

/// Game memory reader configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ReaderConfig {
    /// Path to the reader executable. Required for the announce command.
    pub path: Option<PathBuf>,
    /// Extra arguments passed to the reader (the reader normally takes none).
    pub args: Vec<String>,
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TtsConfig {
    pub language: String,
    pub tld: String,
    pub timeout_secs: u64,
}

/// Audio playback configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Where the most recent synthesized clip is persisted.
    /// Defaults to ~/.cache/questvox/announcement.mp3.
    pub artifact_path: Option<PathBuf>,
    /// Set to false to skip persisting the clip entirely.
    pub keep_artifact: Option<bool>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            tld: defaults::DEFAULT_TLD.to_string(),
            timeout_secs: defaults::SYNTHESIS_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - QUESTVOX_READER → reader.path
    /// - QUESTVOX_LANGUAGE → tts.language
    /// - QUESTVOX_TLD → tts.tld
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(reader) = std::env::var("QUESTVOX_READER")
            && !reader.is_empty()
        {
            self.reader.path = Some(PathBuf::from(reader));
        }

        if let Ok(language) = std::env::var("QUESTVOX_LANGUAGE")
            && !language.is_empty()
        {
            self.tts.language = language;
        }

        if let Ok(tld) = std::env::var("QUESTVOX_TLD")
            && !tld.is_empty()
        {
            self.tts.tld = tld;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/questvox/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("questvox")
            .join("config.toml")
    }

    /// Resolve the audio artifact path, falling back to the cache directory.
    pub fn artifact_path(&self) -> PathBuf {
        self.playback
            .artifact_path
            .clone()
            .unwrap_or_else(default_artifact_path)
    }
}

/// Default location of the persisted audio artifact.
///
/// Uses `~/.cache/questvox/announcement.mp3` on Linux/Unix.
pub fn default_artifact_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("questvox")
        .join(defaults::ARTIFACT_FILENAME)
}
