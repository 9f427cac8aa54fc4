//! Application entry points.
//!
//! Composes the full announcement flow:
//! spawn reader → read lines → extract quest text → synthesize → play

use crate::announcer::{Announcer, AnnouncerStats};
use crate::config::Config;
use crate::error::{QuestvoxError, Result};
use crate::playback::{AudioPlayer, RodioPlayer};
use crate::reader::GameReader;
use crate::tts::{GoogleTranslateSynthesizer, SpeechSynthesizer};
use std::path::PathBuf;
use std::time::Duration;

/// Apply CLI overrides on top of the loaded configuration.
pub fn apply_overrides(
    config: &mut Config,
    reader: Option<PathBuf>,
    language: Option<String>,
    tld: Option<String>,
) {
    if let Some(r) = reader {
        config.reader.path = Some(r);
    }
    if let Some(l) = language {
        config.tts.language = l;
    }
    if let Some(t) = tld {
        config.tts.tld = t;
    }
}

/// Run the announce command: spawn the reader and speak quest updates
/// until the reader exits or Ctrl+C is pressed.
///
/// # Errors
/// Returns an error if no reader is configured, if the reader cannot be
/// launched (fatal — there is no data source without it), or if the
/// announcer's stream read fails. Per-line failures are contained inside
/// the announcer and reported in the session summary instead.
pub async fn run_announce_command(
    mut config: Config,
    reader: Option<PathBuf>,
    language: Option<String>,
    tld: Option<String>,
    quiet: bool,
    verbosity: u8,
) -> Result<()> {
    apply_overrides(&mut config, reader, language, tld);

    let reader_path =
        config
            .reader
            .path
            .clone()
            .ok_or_else(|| QuestvoxError::ConfigInvalidValue {
                key: "reader.path".to_string(),
                message: "no reader executable configured (set reader.path or pass --reader)"
                    .to_string(),
            })?;

    let synthesizer = build_synthesizer(&config)?;
    let player = RodioPlayer::new();
    let artifact = artifact_destination(&config);

    let mut game_reader = GameReader::spawn(&reader_path, &config.reader.args)?;
    let stdout = game_reader.stdout()?;

    if !quiet {
        eprintln!(
            "Reader started ({}). Listening for quest updates...",
            reader_path.display()
        );
    }

    let mut announcer = Announcer::new(synthesizer, player)
        .with_artifact_path(artifact)
        .with_quiet(quiet)
        .with_verbosity(verbosity);

    let mut task = tokio::spawn(async move { announcer.run(stdout).await });

    let stats = tokio::select! {
        res = &mut task => {
            // Reader closed its stdout; reap it
            game_reader.shutdown().await?;
            join_stats(res)?
        }
        _ = tokio::signal::ctrl_c() => {
            if !quiet {
                eprintln!("\nShutting down...");
            }
            // Killing the reader closes its stdout, which ends the
            // announcer loop; a clip already playing finishes first.
            game_reader.shutdown().await?;
            join_stats(task.await)?
        }
    };

    if !quiet && verbosity >= 1 {
        eprintln!("Session: {}", stats.summary());
    }

    Ok(())
}

/// Run the say command: synthesize and play one phrase, no reader.
pub async fn run_say_command(config: Config, text: &str) -> Result<()> {
    let synthesizer = build_synthesizer(&config)?;

    println!("{}", text);
    let audio = synthesizer.synthesize(text).await?;

    if let Some(path) = artifact_destination(&config) {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            eprintln!("questvox: failed to create artifact directory: {}", e);
        } else if let Err(e) = std::fs::write(&path, &audio) {
            eprintln!(
                "questvox: failed to persist artifact {}: {}",
                path.display(),
                e
            );
        }
    }

    let mut player = RodioPlayer::new();
    player.play(&audio)
}

/// Construct the synthesis backend from configuration.
fn build_synthesizer(config: &Config) -> Result<GoogleTranslateSynthesizer> {
    GoogleTranslateSynthesizer::new(
        &config.tts.language,
        &config.tts.tld,
        Duration::from_secs(config.tts.timeout_secs),
    )
}

/// Where to persist the most recent clip, if persistence is enabled.
fn artifact_destination(config: &Config) -> Option<PathBuf> {
    match config.playback.keep_artifact {
        Some(false) => None,
        _ => Some(config.artifact_path()),
    }
}

/// Unwrap a joined announcer task into its run statistics.
fn join_stats(
    res: std::result::Result<Result<AnnouncerStats>, tokio::task::JoinError>,
) -> Result<AnnouncerStats> {
    res.map_err(|e| QuestvoxError::Other(format!("announcer task failed: {}", e)))?
}
