//! Local audio playback.
//!
//! Playback is deliberately blocking: spoken announcements cannot overlap,
//! so the announcer waits for each clip to finish before reading the next
//! line.

use crate::error::{QuestvoxError, Result};
use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;

/// Pluggable audio playback backend.
/// Plays one audio buffer to completion before returning.
pub trait AudioPlayer: Send {
    /// Play `audio` (an encoded clip, MP3 here) and block until it ends.
    fn play(&mut self, audio: &[u8]) -> Result<()>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "player"
    }
}

/// Plays clips through the default output device via rodio.
///
/// The output stream is opened per clip rather than held open; the device
/// handle is not `Send`, and announcements are rare enough that re-opening
/// costs nothing audible.
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for RodioPlayer {
    fn play(&mut self, audio: &[u8]) -> Result<()> {
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| QuestvoxError::Playback {
                message: format!("no audio output device: {}", e),
            })?;

        let sink = Sink::try_new(&handle).map_err(|e| QuestvoxError::Playback {
            message: format!("failed to open playback sink: {}", e),
        })?;

        let source =
            Decoder::new(Cursor::new(audio.to_vec())).map_err(|e| QuestvoxError::Playback {
                message: format!("failed to decode audio: {}", e),
            })?;

        sink.append(source);
        sink.sleep_until_end();

        Ok(())
    }

    fn name(&self) -> &'static str {
        "rodio"
    }
}
