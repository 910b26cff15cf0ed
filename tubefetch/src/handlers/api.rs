use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json
};
use serde::{Deserialize, Serialize};
use yt_dlp::{FormatDescriptor, ProgressEvent, VideoMetadata};

use crate::display::{progress_line, size_label};
use crate::downloader::ProgressListener;
use crate::error::{AppError, DownloadError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: Option<String>
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub message: String,
    pub title: String,
    pub quality: String,
    pub size: String
}

/// Sends progress to the log; the HTTP response only carries the outcome.
///
/// Every update goes out at debug level, and an info line marks each 10%
/// step of the high-water mark.
#[derive(Default)]
pub struct LogListener {
    max_percent: f64,
    last_step: u32
}

impl ProgressListener for LogListener {
    fn on_metadata(&mut self, metadata: &VideoMetadata) {
        tracing::info!("Fetched metadata for {}", metadata.title());
    }

    fn on_format(&mut self, format: Option<&FormatDescriptor>) {
        match format {
            Some(f) => tracing::info!(
                "Selected format {} ({}p, {})",
                f.format_id,
                f.height.unwrap_or(0),
                size_label(f.estimated_size())
            ),
            None => tracing::info!("No suitable format found, using default quality")
        }
    }

    fn on_progress(&mut self, event: &ProgressEvent) {
        if event.is_finished() {
            tracing::info!("Download finished, post-processing");
            return;
        }

        let Some(line) = progress_line(event) else {
            return;
        };
        tracing::debug!("{}", line);

        // yt-dlp restarts at 0% for every format it fetches, keep the high-water mark
        let percent = event.percent().unwrap_or(0.0);
        if percent <= self.max_percent {
            return;
        }
        self.max_percent = percent;

        let step = ten_percent_step(percent);
        if step > self.last_step {
            self.last_step = step;
            tracing::info!("Download progress: {:.1}%", self.max_percent);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ten_percent_step(percent: f64) -> u32 {
    (percent.clamp(0.0, 100.0) / 10.0) as u32
}

#[tracing::instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>
) -> Result<Json<DownloadResponse>, AppError> {
    let Json(input) = payload?;
    let url = input
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(DownloadError::MissingUrl)?;

    let mut listener = LogListener::default();
    let report = state.downloader.run(url, &mut listener).await?;

    Ok(Json(DownloadResponse {
        success: true,
        message: "Download complete".to_string(),
        quality: report.quality_label(),
        size: report.size_label(),
        title: report.title
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_url_deserializes() {
        let req: DownloadRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_none());
    }

    #[test]
    fn test_log_listener_tracks_high_water_mark() {
        let mut listener = LogListener::default();
        listener.on_progress(&ProgressEvent::downloading(80, Some(100)));
        listener.on_progress(&ProgressEvent::downloading(10, Some(100)));
        assert!((listener.max_percent - 80.0).abs() < f64::EPSILON);
        assert_eq!(listener.last_step, 8);
    }

    #[test]
    fn test_log_listener_steps_survive_restart() {
        let mut listener = LogListener::default();
        for downloaded in [5, 12, 15, 3, 25] {
            listener.on_progress(&ProgressEvent::downloading(downloaded, Some(100)));
        }
        assert_eq!(listener.last_step, 2);
        assert!((listener.max_percent - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_log_listener_ignores_unknown_total() {
        let mut listener = LogListener::default();
        listener.on_progress(&ProgressEvent::downloading(500, None));
        assert_eq!(listener.last_step, 0);
        assert!(listener.max_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn test_ten_percent_step() {
        assert_eq!(ten_percent_step(0.0), 0);
        assert_eq!(ten_percent_step(9.9), 0);
        assert_eq!(ten_percent_step(10.0), 1);
        assert_eq!(ten_percent_step(100.0), 10);
        assert_eq!(ten_percent_step(250.0), 10);
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_value(DownloadResponse {
            success: true,
            message: "Download complete".to_string(),
            title: "t".to_string(),
            quality: "720p".to_string(),
            size: "1.0 MB".to_string()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({
            "success": true,
            "message": "Download complete",
            "title": "t",
            "quality": "720p",
            "size": "1.0 MB"
        }));
    }
}
