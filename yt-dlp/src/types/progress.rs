#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Downloading,
    Finished
}

impl ProgressStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "downloading" => Some(ProgressStatus::Downloading),
            "finished" => Some(ProgressStatus::Finished),
            _ => None
        }
    }
}

/// Snapshot of a running download as reported by yt-dlp's progress hook.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub downloaded_bytes: u64,
    pub total_bytes: Option<u64>,
    pub total_bytes_estimate: Option<u64>,
    /// Bytes per second.
    pub speed: Option<f64>,
    /// Seconds remaining.
    pub eta: Option<u64>
}

impl ProgressEvent {
    pub fn downloading(downloaded_bytes: u64, total_bytes: Option<u64>) -> Self {
        Self {
            status: ProgressStatus::Downloading,
            downloaded_bytes,
            total_bytes,
            total_bytes_estimate: None,
            speed: None,
            eta: None
        }
    }

    pub fn finished(total_bytes: Option<u64>) -> Self {
        Self {
            status: ProgressStatus::Finished,
            downloaded_bytes: total_bytes.unwrap_or(0),
            total_bytes,
            total_bytes_estimate: None,
            speed: None,
            eta: None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == ProgressStatus::Finished
    }

    /// Exact total if known, else the extractor's estimate. Zero counts as unknown.
    pub fn total(&self) -> Option<u64> {
        self.total_bytes
            .or(self.total_bytes_estimate)
            .filter(|t| *t > 0)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> Option<f64> {
        self.total()
            .map(|total| self.downloaded_bytes as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    Destination { filename: String },
    Progress(ProgressEvent),
    Merging { filename: Option<String> },
    Warning { message: String }
}

impl DownloadEvent {
    pub fn is_finished(&self) -> bool {
        matches!(self, DownloadEvent::Progress(p) if p.is_finished())
    }
}
