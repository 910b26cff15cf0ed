use async_trait::async_trait;
use tokio_stream::StreamExt;
use yt_dlp::{DownloadEvent, DownloadOptions, ProgressEvent, VideoMetadata, YtDlp};

/// The extraction/download backend the front-end drives.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Fetches metadata without downloading. `Ok(None)` means the engine
    /// finished without producing anything.
    async fn extract_info(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> yt_dlp::Result<Option<VideoMetadata>>;

    /// Downloads into the location described by `options`, reporting
    /// progress through `on_progress` as it arrives.
    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        on_progress: &mut (dyn for<'p> FnMut(&'p ProgressEvent) + Send)
    ) -> yt_dlp::Result<()>;
}

#[async_trait]
impl Engine for YtDlp {
    async fn extract_info(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> yt_dlp::Result<Option<VideoMetadata>> {
        self.get_video_info(url, options).await
    }

    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        on_progress: &mut (dyn for<'p> FnMut(&'p ProgressEvent) + Send)
    ) -> yt_dlp::Result<()> {
        let mut stream = self.download_with_progress(url, options);

        while let Some(event) = stream.next().await {
            match event? {
                DownloadEvent::Progress(progress) => on_progress(&progress),
                DownloadEvent::Destination { filename } => {
                    tracing::info!("Writing to {}", filename);
                }
                DownloadEvent::Merging { filename } => {
                    tracing::debug!(?filename, "merging formats");
                }
                DownloadEvent::Warning { message } => {
                    tracing::warn!("yt-dlp warning: {}", message);
                }
            }
        }

        Ok(())
    }
}
