//! Launches the game memory reader as a child process.
//!
//! The reader is a one-way event source: it is started with stdout piped,
//! receives no input, and may exit at any time. When it does, its stdout
//! closes and the announcer loop ends on its own.

use crate::error::{QuestvoxError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, ChildStdout, Command};

/// Handle to a running reader process.
#[derive(Debug)]
pub struct GameReader {
    child: Child,
}

impl GameReader {
    /// Spawn the reader executable with its stdout captured.
    ///
    /// stdin and stderr are inherited; stdout is the sole data channel.
    ///
    /// # Errors
    /// Returns `QuestvoxError::ReaderLaunch` if the executable is missing
    /// or cannot be started. This is fatal to the caller — there is no
    /// data source without the reader.
    pub fn spawn(path: &Path, args: &[String]) -> Result<Self> {
        let child = Command::new(path)
            .args(args)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| QuestvoxError::ReaderLaunch {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { child })
    }

    /// Take the captured stdout stream. Can only be called once.
    pub fn stdout(&mut self) -> Result<ChildStdout> {
        self.child.stdout.take().ok_or_else(|| QuestvoxError::Reader {
            message: "reader stdout already taken".to_string(),
        })
    }

    /// OS process id, if the reader is still running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Kill the reader if it is still running and reap it.
    ///
    /// Killing closes the reader's stdout, which lets the announcer loop
    /// reach end-of-stream and exit cleanly. Safe to call after the child
    /// has already exited.
    pub async fn shutdown(&mut self) -> Result<()> {
        // start_kill fails with InvalidInput once the child has been reaped
        if let Err(e) = self.child.start_kill()
            && e.kind() != std::io::ErrorKind::InvalidInput
        {
            return Err(QuestvoxError::Reader {
                message: format!("failed to kill reader: {}", e),
            });
        }
        self.child.wait().await.map_err(|e| QuestvoxError::Reader {
            message: format!("failed to reap reader: {}", e),
        })?;
        Ok(())
    }
}
