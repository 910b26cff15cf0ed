use std::path::PathBuf;
use std::pin::Pin;

use futures_core::Stream;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::command::{CommandBuilder, PROGRESS_MARKER};
use crate::error::{Error, Result};
use crate::types::{DownloadEvent, DownloadOptions, ProgressEvent, ProgressStatus, VideoMetadata};

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_file: Option<PathBuf>,
    extra_args: Vec<String>,
    ffmpeg_location: Option<PathBuf>
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self::with_binary("yt-dlp")
    }

    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: path.into(),
            cookies_file: None,
            extra_args: Vec::new(),
            ffmpeg_location: None
        }
    }

    pub fn set_cookies_file(&mut self, path: Option<PathBuf>) {
        self.cookies_file = path;
    }

    pub fn set_extra_args(&mut self, args: Vec<String>) {
        self.extra_args = args;
    }

    pub fn set_ffmpeg_location(&mut self, path: Option<PathBuf>) {
        self.ffmpeg_location = path;
    }

    pub async fn check_binary(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::BinaryNotExecutable(self.binary.clone()))
        }
    }

    /// Extracts metadata without downloading anything.
    ///
    /// Returns `Ok(None)` when yt-dlp exits cleanly without producing a
    /// document, which happens when `--ignore-errors` swallowed the failure.
    pub async fn get_video_info(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> Result<Option<VideoMetadata>> {
        let builder = self
            .command()
            .with_options(options)
            .json_output()
            .skip_download()
            .no_playlist()
            .url(url);

        tracing::debug!(
            binary = %self.binary.display(),
            args = ?builder.get_args(),
            "fetching video info"
        );

        let output = builder.build().output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let document = stdout.lines().map(str::trim).find(|l| !l.is_empty());

        match document {
            Some(line) if line != "null" => Ok(Some(serde_json::from_str(line)?)),
            _ if output.status.success() => Ok(None),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let lines: Vec<String> = stderr.lines().map(String::from).collect();
                Err(Error::CommandFailed {
                    code: output.status.code().unwrap_or(-1),
                    stderr: stderr_summary(&lines)
                })
            }
        }
    }

    /// Runs a download and streams progress as it is reported.
    ///
    /// The stream ends with an error if yt-dlp exits non-zero, or if it
    /// reported an `ERROR:` line while `--ignore-errors` kept the exit code at
    /// zero. A successful run always yields a finished progress event.
    pub fn download_with_progress(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> Pin<Box<dyn Stream<Item = Result<DownloadEvent>> + Send + '_>> {
        let url = url.to_string();
        let builder = self
            .command()
            .with_options(options)
            .machine_progress()
            .url(&url);
        let binary = self.binary.clone();

        Box::pin(async_stream::try_stream! {
            tracing::debug!(
                binary = %binary.display(),
                args = ?builder.get_args(),
                "spawning yt-dlp"
            );

            let mut cmd = builder.build();
            cmd.stdout(std::process::Stdio::piped());
            cmd.stderr(std::process::Stdio::piped());

            let mut child = cmd.spawn()?;

            let stderr = child
                .stderr
                .take()
                .ok_or_else(|| Error::ExecutionFailed(std::io::Error::other("stderr not captured")))?;
            let stderr_task = tokio::spawn(async move {
                let mut lines = Vec::new();
                let mut reader = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = reader.next_line().await {
                    tracing::trace!(line = %line, "yt-dlp stderr");
                    lines.push(line);
                }
                lines
            });

            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| Error::ExecutionFailed(std::io::Error::other("stdout not captured")))?;
            let mut reader = BufReader::new(stdout).lines();

            let mut current_filename: Option<String> = None;
            let mut last_total: Option<u64> = None;
            let mut finished = false;

            while let Some(line) = reader.next_line().await? {
                tracing::trace!(line = %line, "yt-dlp stdout");
                if let Some(event) = parse_progress_line(&line, &mut current_filename) {
                    if let DownloadEvent::Progress(ref progress) = event {
                        last_total = progress.total().or(last_total);
                        finished = progress.is_finished();
                    }
                    yield event;
                }
            }

            let status = child.wait().await?;
            let stderr_lines = stderr_task.await.unwrap_or_default();

            if !status.success() {
                Err::<(), _>(Error::CommandFailed {
                    code: status.code().unwrap_or(-1),
                    stderr: stderr_summary(&stderr_lines)
                })?;
            }

            if let Some(message) = first_error(&stderr_lines) {
                Err::<(), _>(Error::DownloadFailed(message))?;
            }

            if !finished {
                yield DownloadEvent::Progress(ProgressEvent::finished(last_total));
            }
        })
    }

    fn command(&self) -> CommandBuilder {
        let mut builder = CommandBuilder::new(&self.binary)
            .cookies_file_opt(self.cookies_file.as_ref())
            .args(self.extra_args.iter().map(String::as_str));

        if let Some(ref ffmpeg_path) = self.ffmpeg_location {
            builder = builder.ffmpeg_location(ffmpeg_path);
        }

        builder
    }
}

fn first_error(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .find_map(|l| l.trim().strip_prefix("ERROR:"))
        .map(|m| m.trim().to_string())
}

/// `ERROR:` lines when there are any, otherwise everything yt-dlp wrote.
fn stderr_summary(lines: &[String]) -> String {
    let errors: Vec<&str> = lines
        .iter()
        .map(|l| l.as_str().trim())
        .filter(|l| l.starts_with("ERROR:"))
        .collect();
    if errors.is_empty() {
        lines.join("\n").trim().to_string()
    } else {
        errors.join("\n")
    }
}

fn parse_progress_line(line: &str, current_filename: &mut Option<String>) -> Option<DownloadEvent> {
    let line = line.trim();

    if let Some(filename) = line.strip_prefix("[download] Destination:") {
        let filename = filename.trim().to_string();
        *current_filename = Some(filename.clone());
        return Some(DownloadEvent::Destination { filename });
    }

    if line.starts_with(PROGRESS_MARKER) {
        return parse_template_progress(line).map(DownloadEvent::Progress);
    }

    if line.starts_with("[Merger]") || line.contains("Merging formats") {
        if let Some(start) = line.find('"')
            && let Some(end) = line.rfind('"')
            && end > start
        {
            *current_filename = Some(line[start + 1..end].to_string());
        }
        return Some(DownloadEvent::Merging {
            filename: current_filename.clone()
        });
    }

    if let Some(message) = line.strip_prefix("WARNING:") {
        return Some(DownloadEvent::Warning {
            message: message.trim().to_string()
        });
    }

    None
}

/// Parses a line produced by [`crate::command::PROGRESS_TEMPLATE`], e.g.
/// `yt-dlp-progress|downloading|512|1024|NA|256.0|2`.
fn parse_template_progress(line: &str) -> Option<ProgressEvent> {
    let mut fields = line.strip_prefix(PROGRESS_MARKER)?.strip_prefix('|')?.split('|');

    let status = ProgressStatus::parse(fields.next()?)?;
    let downloaded_bytes = fields.next().and_then(parse_number).map_or(0, to_bytes);
    let total_bytes = fields.next().and_then(parse_number).map(to_bytes);
    let total_bytes_estimate = fields.next().and_then(parse_number).map(to_bytes);
    let speed = fields.next().and_then(parse_number);
    let eta = fields.next().and_then(parse_number).map(to_bytes);

    Some(ProgressEvent {
        status,
        downloaded_bytes,
        total_bytes,
        total_bytes_estimate,
        speed,
        eta
    })
}

fn parse_number(s: &str) -> Option<f64> {
    match s.trim() {
        "" | "NA" | "None" => None,
        s => s.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_bytes(value: f64) -> u64 {
    value.max(0.0) as u64
}
