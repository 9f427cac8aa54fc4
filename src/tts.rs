//! Speech synthesis via the Google Translate TTS endpoint.

use crate::error::{QuestvoxError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Pluggable speech synthesis backend.
/// Converts a text string into a playable audio buffer (MP3 bytes here).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` to audio. The text is submitted exactly as given,
    /// with no trimming or mutation.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "synthesizer"
    }
}

/// Synthesizer backed by `translate.google.{tld}/translate_tts`.
///
/// The endpoint takes a language code (`tl`) and returns MP3 audio; the
/// top-level domain selects the regional service. Unofficial but stable,
/// and requires no API key.
pub struct GoogleTranslateSynthesizer {
    client: reqwest::Client,
    language: String,
    tld: String,
}

impl GoogleTranslateSynthesizer {
    /// Create a synthesizer for the given language code and Google TLD.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(language: &str, tld: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(QuestvoxError::SynthesisRequest)?;

        Ok(Self {
            client,
            language: language.to_string(),
            tld: tld.to_string(),
        })
    }

    /// Endpoint URL for the configured TLD.
    fn endpoint(&self) -> String {
        format!("https://translate.google.{}/translate_tts", self.tld)
    }

    /// Build the synthesis request for `text` without sending it.
    fn request(&self, text: &str) -> reqwest::RequestBuilder {
        self.client.get(self.endpoint()).query(&[
            ("ie", "UTF-8"),
            ("client", "tw-ob"),
            ("tl", self.language.as_str()),
            ("q", text),
        ])
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self.request(text).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuestvoxError::Synthesis {
                message: format!("provider returned status {}", status),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(QuestvoxError::Synthesis {
                message: "provider returned an empty audio body".to_string(),
            });
        }

        Ok(audio.to_vec())
    }

    fn name(&self) -> &'static str {
        "google-translate"
    }
}
