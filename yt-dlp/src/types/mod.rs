mod metadata;
mod options;
mod progress;

pub use metadata::{FormatDescriptor, VideoMetadata};
pub use options::{Container, DownloadOptions, OutputFormat};
pub use progress::{DownloadEvent, ProgressEvent, ProgressStatus};
