use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioNormalizer, NormalizeError};
use crate::domain::normalized_path_for;

use super::{TARGET_CHANNELS, TARGET_SAMPLE_RATE};

const FFMPEG_BINARY: &str = "ffmpeg";

/// Shells out to `ffmpeg` for decoding and resampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegAudioNormalizer;

#[async_trait]
impl AudioNormalizer for FfmpegAudioNormalizer {
    #[tracing::instrument(skip_all, fields(input = %input.display()))]
    async fn normalize(&self, input: &Path) -> Result<PathBuf, NormalizeError> {
        let output_path = normalized_path_for(input);

        let output = Command::new(FFMPEG_BINARY)
            .args(["-nostdin", "-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(input)
            .args(["-vn", "-ac"])
            .arg(TARGET_CHANNELS.to_string())
            .arg("-ar")
            .arg(TARGET_SAMPLE_RATE.to_string())
            .args(["-c:a", "pcm_s16le", "-f", "wav"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => NormalizeError::DecoderMissing(format!(
                    "`{FFMPEG_BINARY}` was not found on PATH"
                )),
                _ => NormalizeError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let _ = tokio::fs::remove_file(&output_path).await;
            return Err(NormalizeError::DecodingFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(output_path)
    }
}

/// Fails when `ffmpeg` cannot be executed.
pub fn check_ffmpeg_binary() -> Result<(), NormalizeError> {
    let output = std::process::Command::new(FFMPEG_BINARY)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| NormalizeError::DecoderMissing(format!("{FFMPEG_BINARY}: {e}")))?;

    if !output.success() {
        return Err(NormalizeError::DecoderMissing(format!(
            "`{FFMPEG_BINARY} -version` exited with {output}"
        )));
    }

    Ok(())
}
