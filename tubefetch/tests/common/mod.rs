#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tubefetch::downloader::{Downloader, DownloaderConfig, ProgressListener, Stage};
use tubefetch::engine::Engine;
use yt_dlp::{DownloadOptions, FormatDescriptor, ProgressEvent, VideoMetadata};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Extract { url: String },
    Download { url: String, format: Option<String>, template: Option<String> }
}

/// Scripted stand-in for yt-dlp.
#[derive(Default)]
pub struct FakeEngine {
    pub metadata: Option<VideoMetadata>,
    pub extract_error: Option<String>,
    pub download_error: Option<String>,
    pub progress: Vec<ProgressEvent>,
    pub calls: Mutex<Vec<Call>>
}

impl FakeEngine {
    pub fn with_metadata(metadata: VideoMetadata) -> Self {
        Self {
            metadata: Some(metadata),
            progress: vec![
                ProgressEvent::downloading(512, Some(1024)),
                ProgressEvent::finished(Some(1024))
            ],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

fn failure(stderr: &str) -> yt_dlp::Error {
    yt_dlp::Error::CommandFailed {
        code: 1,
        stderr: stderr.to_string()
    }
}

#[async_trait]
impl Engine for FakeEngine {
    async fn extract_info(
        &self,
        url: &str,
        _options: &DownloadOptions
    ) -> yt_dlp::Result<Option<VideoMetadata>> {
        self.calls.lock().unwrap().push(Call::Extract { url: url.to_string() });
        match self.extract_error {
            Some(ref stderr) => Err(failure(stderr)),
            None => Ok(self.metadata.clone())
        }
    }

    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        on_progress: &mut (dyn for<'p> FnMut(&'p ProgressEvent) + Send)
    ) -> yt_dlp::Result<()> {
        self.calls.lock().unwrap().push(Call::Download {
            url: url.to_string(),
            format: options.format.as_arg(),
            template: options.output_template.clone()
        });
        for event in &self.progress {
            on_progress(event);
        }
        match self.download_error {
            Some(ref stderr) => Err(failure(stderr)),
            None => Ok(())
        }
    }
}

#[derive(Default)]
pub struct RecordingListener {
    pub stages: Vec<Stage>,
    pub titles: Vec<String>,
    pub formats: Vec<Option<String>>,
    pub progress: Vec<ProgressEvent>
}

impl ProgressListener for RecordingListener {
    fn on_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    fn on_metadata(&mut self, metadata: &VideoMetadata) {
        self.titles.push(metadata.title().to_string());
    }

    fn on_format(&mut self, format: Option<&FormatDescriptor>) {
        self.formats.push(format.map(|f| f.format_id.clone()));
    }

    fn on_progress(&mut self, event: &ProgressEvent) {
        self.progress.push(event.clone());
    }
}

pub fn format(id: &str, ext: &str, height: Option<u32>, filesize: Option<u64>) -> FormatDescriptor {
    FormatDescriptor {
        format_id: id.to_string(),
        ext: Some(ext.to_string()),
        height,
        filesize,
        ..FormatDescriptor::default()
    }
}

pub fn sample_metadata() -> VideoMetadata {
    VideoMetadata {
        id: Some("abc123".to_string()),
        title: Some("Sample Video".to_string()),
        duration: Some(205.0),
        formats: vec![
            format("18", "mp4", Some(360), Some(1_000)),
            format("135", "mp4", Some(480), Some(2_097_152)),
            format("247", "webm", Some(720), Some(5_000)),
            format("137", "mp4", Some(1080), Some(9_000)),
            format("140", "m4a", None, Some(500))
        ],
        ..VideoMetadata::default()
    }
}

pub fn downloader(engine: Arc<FakeEngine>, output_dir: &Path) -> Downloader {
    Downloader::new(engine, DownloaderConfig::new(output_dir))
}
