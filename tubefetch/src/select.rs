use std::cmp::Reverse;

use yt_dlp::FormatDescriptor;

pub const TARGET_HEIGHT: u32 = 720;
pub const PREFERRED_CONTAINER: &str = "mp4";

/// Picks the mp4 variant whose height is closest to `target_height`.
///
/// Variants without a height are skipped. Equally close variants are ranked
/// by known size, larger first, and then by their position in `formats`.
pub fn find_best_format(formats: &[FormatDescriptor], target_height: u32) -> Option<&FormatDescriptor> {
    formats
        .iter()
        .filter(|f| f.ext.as_deref() == Some(PREFERRED_CONTAINER))
        .filter_map(|f| match f.height {
            Some(height) if height > 0 => Some((height, f)),
            _ => None
        })
        .min_by_key(|(height, f)| {
            (
                height.abs_diff(target_height),
                Reverse(f.estimated_size().unwrap_or(0))
            )
        })
        .map(|(_, f)| f)
}
