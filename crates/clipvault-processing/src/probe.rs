//! Media classifier - geometry probing via ffprobe

use clipvault_core::models::Orientation;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to run ffprobe: {0}")]
    Spawn(String),

    #[error("ffprobe exited with status {exit_code:?}: {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    Parse(String),

    #[error("No video stream found")]
    NoVideoStream,

    #[error("ffprobe did not finish within {0:?}")]
    Timeout(Duration),
}

/// Pixel dimensions of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u64,
    pub height: u64,
}

impl Geometry {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_dimensions(self.width, self.height)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u64>,
    height: Option<u64>,
}

/// Runs ffprobe against staged files and derives their orientation.
#[derive(Debug, Clone)]
pub struct MediaClassifier {
    ffprobe_path: String,
    timeout: Duration,
}

impl MediaClassifier {
    pub fn new(ffprobe_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout,
        }
    }

    /// Width and height of the first video stream in `path`.
    #[tracing::instrument(skip(self), fields(service = "probe"))]
    pub async fn probe(&self, path: &Path) -> Result<Geometry, ProbeError> {
        let start = std::time::Instant::now();

        let mut command = Command::new(&self.ffprobe_path);
        command
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height",
                "-of",
                "json",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // output() drains stdout and stderr while waiting for exit
        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|e| ProbeError::Spawn(e.to_string()))?,
            Err(_) => {
                error!(timeout_secs = self.timeout.as_secs(), "ffprobe timed out");
                return Err(ProbeError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(exit_code = ?output.status.code(), stderr = %stderr, "ffprobe failed");
            return Err(ProbeError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr,
            });
        }

        let geometry = parse_geometry(&output.stdout)?;

        info!(
            width = geometry.width,
            height = geometry.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Probed media geometry"
        );

        Ok(geometry)
    }

    pub async fn classify(&self, path: &Path) -> Result<Orientation, ProbeError> {
        Ok(self.probe(path).await?.orientation())
    }
}

fn parse_geometry(stdout: &[u8]) -> Result<Geometry, ProbeError> {
    let parsed: FfprobeOutput =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::Parse(e.to_string()))?;

    let stream = parsed
        .streams
        .into_iter()
        .next()
        .ok_or(ProbeError::NoVideoStream)?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) => Ok(Geometry { width, height }),
        _ => Err(ProbeError::Parse(
            "video stream is missing width or height".to_string(),
        )),
    }
}
