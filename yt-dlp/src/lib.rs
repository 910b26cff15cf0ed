//! Async Rust wrapper for the yt-dlp CLI.
//!
//! Covers the two operations a download front-end needs: extracting video
//! metadata without downloading, and running a download while streaming
//! machine-readable progress.
//!
//! # Example
//!
//! ```no_run
//! use tokio_stream::StreamExt;
//! use yt_dlp::{DownloadEvent, DownloadOptions, YtDlp};
//!
//! #[tokio::main]
//! async fn main() -> yt_dlp::Result<()> {
//!     let client = YtDlp::new();
//!     let options = DownloadOptions::new().output_template("%(title)s.%(ext)s");
//!
//!     if let Some(info) = client.get_video_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &options).await? {
//!         println!("Title: {}", info.title());
//!     }
//!
//!     let mut stream = client.download_with_progress("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &options);
//!     while let Some(event) = stream.next().await {
//!         if let DownloadEvent::Progress(progress) = event? {
//!             println!("{:?}", progress.percent());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod command;
pub mod error;
pub mod types;

pub use client::YtDlp;
pub use command::{PROGRESS_MARKER, PROGRESS_TEMPLATE};
pub use error::{Error, Result};
pub use types::{
    Container, DownloadEvent, DownloadOptions, FormatDescriptor, OutputFormat, ProgressEvent,
    ProgressStatus, VideoMetadata
};
