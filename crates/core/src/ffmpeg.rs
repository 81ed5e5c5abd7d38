//! FFmpeg/FFprobe command utilities for video assembly.
//!
//! Scene clips are rendered by looping a still image over the narration
//! audio; the final video is produced with the concat demuxer so clips
//! are joined without re-encoding.

use std::path::Path;

use serde::Deserialize;

/// Frame rate of rendered videos.
pub const VIDEO_FPS: u32 = 24;

/// Width of rendered scene clips in pixels.
pub const VIDEO_WIDTH: u32 = 1024;

/// Height of rendered scene clips in pixels.
pub const VIDEO_HEIGHT: u32 = 1024;

/// Error type for FFmpeg/FFprobe operations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffprobe/ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe/ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("input file not found: {0}")]
    InputNotFound(String),
}

// ---------------------------------------------------------------------------
// ffprobe JSON output structures
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`).
#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    pub streams: Vec<FfprobeStream>,
    pub format: FfprobeFormat,
}

/// A single stream from ffprobe output.
#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub codec_name: Option<String>,
    pub codec_type: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<String>,
}

/// Format-level metadata from ffprobe.
#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
    pub format_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Probing
// ---------------------------------------------------------------------------

/// Run `ffprobe` on a media file and return the parsed JSON output.
pub async fn probe_media(path: &Path) -> Result<FfprobeOutput, FfmpegError> {
    if !path.exists() {
        return Err(FfmpegError::InputNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let output = tokio::process::Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str::<FfprobeOutput>(&stdout)
        .map_err(|e| FfmpegError::ParseError(format!("{e}: {stdout}")))
}

/// Probe a media file and return its duration in seconds.
///
/// Errors when the file has neither a format-level nor a stream-level
/// duration, which means ffmpeg would not be able to sequence it.
pub async fn media_duration_secs(path: &Path) -> Result<f64, FfmpegError> {
    let probe = probe_media(path).await?;
    let duration = parse_duration(&probe);
    if duration <= 0.0 {
        return Err(FfmpegError::ParseError(format!(
            "No duration found for {}",
            path.to_string_lossy()
        )));
    }
    Ok(duration)
}

/// Check whether the `ffmpeg` binary is on the PATH and runnable.
pub async fn ffmpeg_available() -> bool {
    tokio::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a single scene clip: a still image looped for the duration of
/// the narration audio.
///
/// Output is H.264 + AAC in MP4 at [`VIDEO_FPS`], scaled and padded to
/// [`VIDEO_WIDTH`]x[`VIDEO_HEIGHT`] with `yuv420p` pixel format so every
/// clip is concat-compatible with its siblings.
pub async fn render_scene_clip(
    image_path: &Path,
    audio_path: &Path,
    output_path: &Path,
) -> Result<(), FfmpegError> {
    for input in [image_path, audio_path] {
        if !input.exists() {
            return Err(FfmpegError::InputNotFound(
                input.to_string_lossy().to_string(),
            ));
        }
    }

    let scale_filter = format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2",
        w = VIDEO_WIDTH,
        h = VIDEO_HEIGHT,
    );

    let fps = VIDEO_FPS.to_string();
    let output = tokio::process::Command::new("ffmpeg")
        .args(["-y", "-loop", "1", "-i"])
        .arg(image_path)
        .arg("-i")
        .arg(audio_path)
        .args([
            "-c:v",
            "libx264",
            "-tune",
            "stillimage",
            "-c:a",
            "aac",
            "-b:a",
            "192k",
            "-pix_fmt",
            "yuv420p",
            "-vf",
            scale_filter.as_str(),
            "-r",
            fps.as_str(),
            "-shortest",
        ])
        .arg(output_path)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

/// Concatenate scene clips into the final video using the concat demuxer.
///
/// Writes a concat list file next to the output, then joins the clips
/// with stream copy (no re-encode). All clips must share codec settings,
/// which [`render_scene_clip`] guarantees.
pub async fn concat_clips(clip_paths: &[&Path], output_path: &Path) -> Result<(), FfmpegError> {
    if clip_paths.is_empty() {
        return Err(FfmpegError::ParseError(
            "Cannot concatenate an empty clip list".into(),
        ));
    }
    for clip in clip_paths {
        if !clip.exists() {
            return Err(FfmpegError::InputNotFound(
                clip.to_string_lossy().to_string(),
            ));
        }
    }

    let list_path = output_path.with_extension("concat.txt");
    let list_body: String = clip_paths
        .iter()
        .map(|p| concat_list_line(p))
        .collect::<Vec<_>>()
        .join("\n");
    tokio::fs::write(&list_path, list_body).await?;

    let output = tokio::process::Command::new("ffmpeg")
        .args(["-y", "-f", "concat", "-safe", "0", "-i"])
        .arg(&list_path)
        .args(["-c", "copy"])
        .arg(output_path)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    // The list file is scratch either way.
    let _ = tokio::fs::remove_file(&list_path).await;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

/// Format one line of a concat demuxer list file.
///
/// Paths are wrapped in single quotes; embedded single quotes use the
/// demuxer's `'\''` escape.
fn concat_list_line(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\'', "'\\''");
    format!("file '{escaped}'")
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Find the first stream of the given codec type in the ffprobe output.
fn first_stream<'a>(probe: &'a FfprobeOutput, codec_type: &str) -> Option<&'a FfprobeStream> {
    probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some(codec_type))
}

/// Parse the media duration in seconds from ffprobe output.
///
/// Prefers the format-level duration and falls back to the first video
/// or audio stream.
pub fn parse_duration(probe: &FfprobeOutput) -> f64 {
    if let Some(d) = &probe.format.duration {
        if let Ok(secs) = d.parse::<f64>() {
            return secs;
        }
    }
    for codec_type in ["video", "audio"] {
        if let Some(stream) = first_stream(probe, codec_type) {
            if let Some(d) = &stream.duration {
                if let Ok(secs) = d.parse::<f64>() {
                    return secs;
                }
            }
        }
    }
    0.0
}

/// Find the first video stream's resolution.
pub fn parse_resolution(probe: &FfprobeOutput) -> (i32, i32) {
    first_stream(probe, "video")
        .map(|s| (s.width.unwrap_or(0), s.height.unwrap_or(0)))
        .unwrap_or((0, 0))
}
