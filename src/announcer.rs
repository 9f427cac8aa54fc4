//! The announcement loop: reader stdout → JSON line → quest text → speech.
//!
//! One background task consumes the reader's stdout line by line. Lines
//! that carry a quest description are spoken strictly in arrival order,
//! one at a time; everything else is skipped. A bad line never stops the
//! loop — only end-of-stream (the reader exited) or a read failure does.

use crate::error::Result;
use crate::playback::AudioPlayer;
use crate::record::extract_announcement;
use crate::tts::SpeechSynthesizer;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Counters for one announcer run, reported when the stream closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncerStats {
    /// Lines read from the reader, including skipped ones.
    pub lines: u64,
    /// Announcements synthesized and handed to playback.
    pub announced: u64,
    /// Lines dropped because they were not valid UTF-8.
    pub decode_errors: u64,
    /// Lines dropped because they were not valid JSON.
    pub parse_errors: u64,
    /// Announcements dropped because synthesis failed.
    pub synthesis_failures: u64,
    /// Announcements synthesized but not played.
    pub playback_failures: u64,
}

impl AnnouncerStats {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} lines, {} announced, {} skipped (decode {}, parse {}), {} synthesis failures, {} playback failures",
            self.lines,
            self.announced,
            self.decode_errors + self.parse_errors,
            self.decode_errors,
            self.parse_errors,
            self.synthesis_failures,
            self.playback_failures,
        )
    }
}

/// Consumes reader output and speaks quest descriptions.
pub struct Announcer<S: SpeechSynthesizer, P: AudioPlayer> {
    synthesizer: S,
    player: P,
    artifact_path: Option<PathBuf>,
    quiet: bool,
    verbosity: u8,
}

impl<S: SpeechSynthesizer, P: AudioPlayer> Announcer<S, P> {
    pub fn new(synthesizer: S, player: P) -> Self {
        Self {
            synthesizer,
            player,
            artifact_path: None,
            quiet: false,
            verbosity: 0,
        }
    }

    /// Persist each synthesized clip to `path` (overwritten per clip).
    pub fn with_artifact_path(mut self, path: Option<PathBuf>) -> Self {
        self.artifact_path = path;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run the loop until `stream` reaches end-of-stream.
    ///
    /// Per-line failures (bad UTF-8, bad JSON, provider or playback
    /// errors) are counted and skipped; they never end the loop. Only a
    /// read error on the stream itself propagates.
    ///
    /// # Errors
    /// Returns `QuestvoxError::Io` if reading from the stream fails.
    pub async fn run<R>(&mut self, stream: R) -> Result<AnnouncerStats>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(stream);
        let mut stats = AnnouncerStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).await?;
            if n == 0 {
                // Reader closed its stdout (normal or abnormal exit)
                break;
            }
            stats.lines += 1;

            // Decode the raw line ourselves so one bad byte sequence
            // drops one line instead of failing the whole read loop.
            let line = match std::str::from_utf8(&buf) {
                Ok(text) => text.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    stats.decode_errors += 1;
                    if self.verbosity >= 1 {
                        eprintln!("questvox: skipping non-UTF-8 line: {}", e);
                    }
                    continue;
                }
            };

            if line.is_empty() {
                continue;
            }

            let text = match extract_announcement(line) {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(e) => {
                    stats.parse_errors += 1;
                    if self.verbosity >= 1 {
                        eprintln!("questvox: skipping unparseable line: {}", e);
                    }
                    continue;
                }
            };

            // Diagnostic output, before synthesis
            println!("{}", text);

            let audio = match self.synthesizer.synthesize(&text).await {
                Ok(audio) => audio,
                Err(e) => {
                    stats.synthesis_failures += 1;
                    if !self.quiet {
                        eprintln!("questvox: {} — announcement skipped", e);
                    }
                    continue;
                }
            };

            self.persist_artifact(&audio);

            stats.announced += 1;
            if let Err(e) = self.player.play(&audio) {
                stats.playback_failures += 1;
                if !self.quiet {
                    eprintln!("questvox: {} — playback skipped", e);
                }
            }
        }

        Ok(stats)
    }

    /// Best-effort write of the most recent clip; never blocks playback.
    fn persist_artifact(&self, audio: &[u8]) {
        let Some(path) = &self.artifact_path else {
            return;
        };

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            if !self.quiet {
                eprintln!("questvox: failed to create artifact directory: {}", e);
            }
            return;
        }

        if let Err(e) = std::fs::write(path, audio)
            && !self.quiet
        {
            eprintln!(
                "questvox: failed to persist artifact {}: {}",
                path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuestvoxError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // Mock synthesizer — echoes the text back as bytes so the player's
    // received buffers identify which announcement they belong to.
    #[derive(Clone)]
    struct MockSynthesizer {
        calls: Arc<Mutex<Vec<String>>>,
        fail_on_call: Arc<Mutex<Option<usize>>>,
    }

    impl MockSynthesizer {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_on_call: Arc::new(Mutex::new(None)),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn fail_on_call(&self, index: usize) {
            *self.fail_on_call.lock().unwrap() = Some(index);
        }
    }

    #[async_trait]
    impl SpeechSynthesizer for MockSynthesizer {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
            let index = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(text.to_string());
                calls.len() - 1
            };

            if *self.fail_on_call.lock().unwrap() == Some(index) {
                return Err(QuestvoxError::Synthesis {
                    message: "mock provider failure".to_string(),
                });
            }

            Ok(text.as_bytes().to_vec())
        }
    }

    #[derive(Clone)]
    struct MockPlayer {
        played: Arc<Mutex<Vec<Vec<u8>>>>,
        fail_on_call: Arc<Mutex<Option<usize>>>,
    }

    impl MockPlayer {
        fn new() -> Self {
            Self {
                played: Arc::new(Mutex::new(Vec::new())),
                fail_on_call: Arc::new(Mutex::new(None)),
            }
        }

        fn played(&self) -> Vec<Vec<u8>> {
            self.played.lock().unwrap().clone()
        }

        fn fail_on_call(&self, index: usize) {
            *self.fail_on_call.lock().unwrap() = Some(index);
        }
    }

    impl AudioPlayer for MockPlayer {
        fn play(&mut self, audio: &[u8]) -> Result<()> {
            let index = {
                let mut played = self.played.lock().unwrap();
                played.push(audio.to_vec());
                played.len() - 1
            };

            if *self.fail_on_call.lock().unwrap() == Some(index) {
                self.played.lock().unwrap().pop();
                return Err(QuestvoxError::Playback {
                    message: "mock playback failure".to_string(),
                });
            }

            Ok(())
        }
    }

    async fn run_announcer(input: &[u8]) -> (AnnouncerStats, MockSynthesizer, MockPlayer) {
        let synth = MockSynthesizer::new();
        let player = MockPlayer::new();
        let stats = Announcer::new(synth.clone(), player.clone())
            .with_quiet(true)
            .run(input)
            .await
            .unwrap();
        (stats, synth, player)
    }

    #[tokio::test]
    async fn quest_description_is_synthesized_and_played() {
        let input = b"{\"u\":{\"qtts\":{\"questDescription\":\"Find the lost sword\"}}}\n";
        let (stats, synth, player) = run_announcer(input).await;

        assert_eq!(synth.calls(), vec!["Find the lost sword".to_string()]);
        assert_eq!(player.played(), vec![b"Find the lost sword".to_vec()]);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.announced, 1);
    }

    #[tokio::test]
    async fn unrelated_lines_make_no_calls() {
        let input = b"{\"u\":{\"other\":1}}\n{\"u\":{\"qtts\":{}}}\n{\"combat\":true}\n";
        let (stats, synth, player) = run_announcer(input).await;

        assert!(synth.calls().is_empty());
        assert!(player.played().is_empty());
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.announced, 0);
        assert_eq!(stats.parse_errors, 0);
    }

    #[tokio::test]
    async fn announcements_play_in_arrival_order() {
        let input = b"{\"u\":{\"qtts\":{\"questDescription\":\"first\"}}}\n\
            {\"u\":{\"other\":1}}\n\
            {\"u\":{\"qtts\":{\"questDescription\":\"second\"}}}\n\
            {\"u\":{\"qtts\":{\"questDescription\":\"third\"}}}\n";
        let (stats, synth, player) = run_announcer(input).await;

        assert_eq!(
            synth.calls(),
            vec!["first".to_string(), "second".to_string(), "third".to_string()]
        );
        assert_eq!(
            player.played(),
            vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]
        );
        assert_eq!(stats.announced, 3);
    }

    #[tokio::test]
    async fn malformed_json_skips_line_but_not_the_next() {
        let input = b"not-json\n{\"u\":{\"qtts\":{\"questDescription\":\"after bad json\"}}}\n";
        let (stats, synth, _player) = run_announcer(input).await;

        assert_eq!(synth.calls(), vec!["after bad json".to_string()]);
        assert_eq!(stats.parse_errors, 1);
        assert_eq!(stats.announced, 1);
    }

    #[tokio::test]
    async fn invalid_utf8_skips_line_but_not_the_next() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"u\":{\"qtts\":{\"questDescription\":\"before\"}}}\n");
        input.extend_from_slice(&[0xff, 0xfe, 0xfd, b'\n']);
        input.extend_from_slice(b"{\"u\":{\"qtts\":{\"questDescription\":\"after\"}}}\n");

        let (stats, synth, _player) = run_announcer(&input).await;

        assert_eq!(synth.calls(), vec!["before".to_string(), "after".to_string()]);
        assert_eq!(stats.decode_errors, 1);
        assert_eq!(stats.announced, 2);
    }

    #[tokio::test]
    async fn empty_stream_terminates_cleanly() {
        let (stats, synth, player) = run_announcer(b"").await;

        assert_eq!(stats, AnnouncerStats::default());
        assert!(synth.calls().is_empty());
        assert!(player.played().is_empty());
    }

    #[tokio::test]
    async fn blank_lines_are_ignored() {
        let input = b"\n\n{\"u\":{\"qtts\":{\"questDescription\":\"hello\"}}}\n\n";
        let (stats, synth, _player) = run_announcer(input).await;

        assert_eq!(synth.calls(), vec!["hello".to_string()]);
        assert_eq!(stats.parse_errors, 0);
    }

    #[tokio::test]
    async fn last_line_without_newline_is_still_processed() {
        let input = b"{\"u\":{\"qtts\":{\"questDescription\":\"no trailing newline\"}}}";
        let (stats, synth, _player) = run_announcer(input).await;

        assert_eq!(synth.calls(), vec!["no trailing newline".to_string()]);
        assert_eq!(stats.announced, 1);
    }

    #[tokio::test]
    async fn crlf_line_endings_are_stripped() {
        let input = b"{\"u\":{\"qtts\":{\"questDescription\":\"windows reader\"}}}\r\n";
        let (_stats, synth, _player) = run_announcer(input).await;

        assert_eq!(synth.calls(), vec!["windows reader".to_string()]);
    }

    #[tokio::test]
    async fn synthesis_failure_skips_announcement_and_continues() {
        let synth = MockSynthesizer::new();
        let player = MockPlayer::new();
        synth.fail_on_call(0);

        let input: &[u8] = b"{\"u\":{\"qtts\":{\"questDescription\":\"fails\"}}}\n\
            {\"u\":{\"qtts\":{\"questDescription\":\"succeeds\"}}}\n";
        let stats = Announcer::new(synth.clone(), player.clone())
            .with_quiet(true)
            .run(input)
            .await
            .unwrap();

        assert_eq!(stats.synthesis_failures, 1);
        assert_eq!(stats.announced, 1);
        assert_eq!(player.played(), vec![b"succeeds".to_vec()]);
    }

    #[tokio::test]
    async fn playback_failure_skips_clip_and_continues() {
        let synth = MockSynthesizer::new();
        let player = MockPlayer::new();
        player.fail_on_call(0);

        let input: &[u8] = b"{\"u\":{\"qtts\":{\"questDescription\":\"dropped\"}}}\n\
            {\"u\":{\"qtts\":{\"questDescription\":\"heard\"}}}\n";
        let stats = Announcer::new(synth.clone(), player.clone())
            .with_quiet(true)
            .run(input)
            .await
            .unwrap();

        assert_eq!(stats.playback_failures, 1);
        assert_eq!(stats.announced, 2);
        assert_eq!(player.played(), vec![b"heard".to_vec()]);
    }

    #[tokio::test]
    async fn artifact_is_persisted_and_overwritten() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = dir.path().join("announcement.mp3");

        let synth = MockSynthesizer::new();
        let player = MockPlayer::new();

        let input: &[u8] = b"{\"u\":{\"qtts\":{\"questDescription\":\"one\"}}}\n\
            {\"u\":{\"qtts\":{\"questDescription\":\"two\"}}}\n";
        Announcer::new(synth, player)
            .with_artifact_path(Some(artifact.clone()))
            .with_quiet(true)
            .run(input)
            .await
            .unwrap();

        // Only the most recent clip survives
        let contents = std::fs::read(&artifact).unwrap();
        assert_eq!(contents, b"two".to_vec());
    }

    #[tokio::test]
    async fn artifact_parent_directory_is_created() {
        let dir = tempfile::TempDir::new().unwrap();
        let artifact = dir.path().join("nested").join("announcement.mp3");

        let synth = MockSynthesizer::new();
        let player = MockPlayer::new();

        let input: &[u8] = b"{\"u\":{\"qtts\":{\"questDescription\":\"deep\"}}}\n";
        Announcer::new(synth, player)
            .with_artifact_path(Some(artifact.clone()))
            .with_quiet(true)
            .run(input)
            .await
            .unwrap();

        assert!(artifact.exists());
    }

    #[test]
    fn stats_summary_mentions_all_counters() {
        let stats = AnnouncerStats {
            lines: 10,
            announced: 3,
            decode_errors: 1,
            parse_errors: 2,
            synthesis_failures: 1,
            playback_failures: 1,
        };
        let summary = stats.summary();
        assert!(summary.contains("10 lines"));
        assert!(summary.contains("3 announced"));
        assert!(summary.contains("3 skipped"));
    }
}
