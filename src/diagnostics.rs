//! System diagnostics and dependency checking.
//!
//! Verifies that the reader executable, audio output, and artifact
//! directory are usable before a session starts.

use crate::config::Config;
use rodio::OutputStream;
use std::path::Path;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Resource is present and usable
    Ok,
    /// Resource is not found
    NotFound,
    /// Resource is present but has issues
    Warning(String),
}

/// Check that the reader executable exists and is executable.
fn check_reader(path: Option<&Path>) -> CheckResult {
    let Some(path) = path else {
        return CheckResult::NotFound;
    };

    match std::fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return CheckResult::Warning(format!("{} is not a regular file", path.display()));
            }
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if metadata.permissions().mode() & 0o111 == 0 {
                    return CheckResult::Warning(format!(
                        "{} is not executable",
                        path.display()
                    ));
                }
            }
            CheckResult::Ok
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking {}: {}", path.display(), e)),
    }
}

/// Check that a default audio output device can be opened.
fn check_audio_output() -> CheckResult {
    match OutputStream::try_default() {
        Ok(_) => CheckResult::Ok,
        Err(e) => CheckResult::Warning(format!("No usable audio output: {}", e)),
    }
}

/// Check that the artifact directory exists or can be created.
fn check_artifact_dir(artifact_path: &Path) -> CheckResult {
    let Some(parent) = artifact_path.parent() else {
        return CheckResult::Warning("artifact path has no parent directory".to_string());
    };

    match std::fs::create_dir_all(parent) {
        Ok(()) => CheckResult::Ok,
        Err(e) => CheckResult::Warning(format!(
            "Cannot create artifact directory {}: {}",
            parent.display(),
            e
        )),
    }
}

/// Run all dependency checks and print results.
pub fn check_dependencies(config: &Config) {
    println!("Checking questvox dependencies...\n");

    print!("reader executable: ");
    match check_reader(config.reader.path.as_deref()) {
        CheckResult::Ok => {
            if let Some(path) = &config.reader.path {
                println!("✓ OK ({})", path.display());
            } else {
                println!("✓ OK");
            }
        }
        CheckResult::NotFound => {
            println!("✗ NOT CONFIGURED / NOT FOUND");
            println!("  Set reader.path in the config file or pass --reader <PATH>");
        }
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }

    print!("audio output: ");
    match check_audio_output() {
        CheckResult::Ok => println!("✓ OK"),
        CheckResult::NotFound => println!("✗ NOT FOUND"),
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }

    print!("artifact directory: ");
    let artifact = config.artifact_path();
    match check_artifact_dir(&artifact) {
        CheckResult::Ok => println!("✓ OK ({})", artifact.display()),
        CheckResult::NotFound => println!("✗ NOT FOUND"),
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }

    println!();
    println!(
        "Synthesis endpoint: https://translate.google.{}/translate_tts (tl={})",
        config.tts.tld, config.tts.language
    );
}
