//! Human-readable rendering of byte counts, durations and progress.

use yt_dlp::ProgressEvent;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

pub fn format_size(bytes: f64) -> String {
    let mut value = bytes;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} TB")
}

#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes as f64)
}

pub fn format_speed(bytes_per_sec: f64) -> String {
    format!("{}/s", format_size(bytes_per_sec))
}

pub fn size_label(bytes: Option<u64>) -> String {
    bytes.map_or_else(|| "Unknown".to_string(), format_bytes)
}

/// Whole minutes and the remaining whole seconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn split_duration(seconds: f64) -> (u64, u64) {
    let total = seconds as u64;
    (total / 60, total % 60)
}

pub fn format_duration(seconds: f64) -> String {
    let (minutes, seconds) = split_duration(seconds);
    format!("{minutes}m {seconds}s")
}

/// One-line status for a download in progress.
///
/// Returns `None` until the total size is known, exact or estimated.
pub fn progress_line(event: &ProgressEvent) -> Option<String> {
    let total = event.total()?;
    let percent = event.percent().unwrap_or(0.0);

    let speed = event
        .speed
        .filter(|s| *s > 0.0)
        .map_or_else(|| "N/A".to_string(), format_speed);

    #[allow(clippy::cast_precision_loss)]
    let eta = event
        .eta
        .filter(|e| *e > 0)
        .map_or_else(|| "N/A".to_string(), |e| format_duration(e as f64));

    Some(format!(
        "Progress: {percent:.1}% | {}/{} | Speed: {speed} | ETA: {eta}",
        format_bytes(event.downloaded_bytes),
        format_bytes(total)
    ))
}
