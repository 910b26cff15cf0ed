use serde::{Deserialize, Serialize};

/// Metadata reported by `yt-dlp --dump-json` for a single video.
///
/// Only the fields the front-end reads are modelled; everything else in the
/// JSON document is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub formats: Vec<FormatDescriptor>
}

impl VideoMetadata {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }
}

/// One downloadable variant of a video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatDescriptor {
    #[serde(default)]
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>
}

impl FormatDescriptor {
    /// Exact size when the extractor knows it, otherwise its estimate.
    pub fn estimated_size(&self) -> Option<u64> {
        self.filesize.or(self.filesize_approx)
    }
}
