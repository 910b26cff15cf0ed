use std::path::{Path, PathBuf};
use std::sync::Arc;

use yt_dlp::{Container, DownloadOptions, FormatDescriptor, OutputFormat, ProgressEvent, VideoMetadata};

use crate::display::size_label;
use crate::engine::Engine;
use crate::error::DownloadError;
use crate::select::{TARGET_HEIGHT, find_best_format};
use crate::url::normalize_url;

/// Format expression used when no single video format is picked.
pub const DEFAULT_FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    FetchingMetadata,
    SelectingFormat,
    Downloading,
    Completed,
    Failed
}

/// Observer for a single download. Every method defaults to doing nothing.
pub trait ProgressListener: Send {
    fn on_stage(&mut self, _stage: Stage) {}

    fn on_metadata(&mut self, _metadata: &VideoMetadata) {}

    fn on_format(&mut self, _format: Option<&FormatDescriptor>) {}

    fn on_progress(&mut self, _event: &ProgressEvent) {}
}

/// Listener for callers that only care about the final result.
pub struct Silent;

impl ProgressListener for Silent {}

#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    pub output_dir: PathBuf,
    pub target_height: u32
}

impl DownloaderConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            target_height: TARGET_HEIGHT
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub title: String,
    pub duration: Option<f64>,
    pub format_id: Option<String>,
    pub quality: Option<u32>,
    pub size: Option<u64>
}

impl DownloadReport {
    pub fn quality_label(&self) -> String {
        self.quality
            .map_or_else(|| "default quality".to_string(), |h| format!("{h}p"))
    }

    pub fn size_label(&self) -> String {
        size_label(self.size)
    }
}

/// Engine options shared by every request before format selection narrows them.
pub fn base_options(output_dir: &Path) -> DownloadOptions {
    DownloadOptions::new()
        .format(OutputFormat::Custom(DEFAULT_FORMAT.to_string()))
        .container(Container::Mp4)
        .output_template(output_dir.join(OUTPUT_TEMPLATE).to_string_lossy())
        .quiet(true)
        .no_warnings(true)
        .ignore_errors(true)
}

/// Format expression pairing one chosen video format with the best m4a audio.
pub fn with_best_audio(format_id: &str) -> OutputFormat {
    OutputFormat::Custom(format!("{format_id}+bestaudio[ext=m4a]"))
}

/// Runs one request through metadata lookup, format selection and download.
#[derive(Clone)]
pub struct Downloader {
    engine: Arc<dyn Engine>,
    config: DownloaderConfig
}

impl Downloader {
    pub fn new(engine: Arc<dyn Engine>, config: DownloaderConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Downloads `url`, reporting each stage to `listener`.
    ///
    /// Failures are terminal; nothing is retried.
    #[tracing::instrument(skip(self, listener))]
    pub async fn run(
        &self,
        url: &str,
        listener: &mut dyn ProgressListener
    ) -> Result<DownloadReport, DownloadError> {
        let result = self.execute(url, listener).await;

        match &result {
            Ok(report) => {
                tracing::info!("Downloaded {} ({})", report.title, report.quality_label());
                enter(Stage::Completed, listener);
            }
            Err(e) => {
                tracing::warn!("Download of {} failed: {}", url, e);
                enter(Stage::Failed, listener);
            }
        }

        result
    }

    async fn execute(
        &self,
        url: &str,
        listener: &mut dyn ProgressListener
    ) -> Result<DownloadReport, DownloadError> {
        let url = normalize_url(url);
        let mut options = base_options(&self.config.output_dir);

        enter(Stage::FetchingMetadata, listener);
        let metadata = self
            .engine
            .extract_info(&url, &options)
            .await?
            .ok_or(DownloadError::MetadataUnavailable)?;
        listener.on_metadata(&metadata);

        enter(Stage::SelectingFormat, listener);
        let selected = find_best_format(&metadata.formats, self.config.target_height);
        listener.on_format(selected);

        match selected {
            Some(format) => {
                tracing::debug!(format_id = %format.format_id, height = ?format.height, "selected format");
                options.format = with_best_audio(&format.format_id);
            }
            None => tracing::debug!("no {} format with a height, using default", crate::select::PREFERRED_CONTAINER)
        }

        let report = DownloadReport {
            title: metadata.title().to_string(),
            duration: metadata.duration,
            format_id: selected.map(|f| f.format_id.clone()),
            quality: selected.and_then(|f| f.height),
            size: selected.and_then(FormatDescriptor::estimated_size)
        };

        enter(Stage::Downloading, listener);
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        self.engine
            .download(&url, &options, &mut |event: &ProgressEvent| listener.on_progress(event))
            .await?;

        Ok(report)
    }
}

fn enter(stage: Stage, listener: &mut dyn ProgressListener) {
    tracing::debug!(?stage, "download stage");
    listener.on_stage(stage);
}
