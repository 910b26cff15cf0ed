use std::borrow::Cow;

const SHORT_DOMAIN: &str = "youtu.be";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Rewrites a `youtu.be` short link into its `watch?v=` form.
///
/// Anything else, malformed input included, is returned untouched.
pub fn normalize_url(input: &str) -> Cow<'_, str> {
    if !input.contains(SHORT_DOMAIN) {
        return Cow::Borrowed(input);
    }

    let last_segment = input.rsplit('/').next().unwrap_or(input);
    let video_id = last_segment.split('?').next().unwrap_or(last_segment);

    Cow::Owned(format!("{WATCH_URL}{video_id}"))
}
