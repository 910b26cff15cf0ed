//! Drives the yt-dlp engine through the orchestrator with a shell script
//! standing in for the binary.
#![cfg(unix)]

mod common;

use std::sync::Arc;

use common::RecordingListener;
use tempfile::TempDir;
use tubefetch::downloader::{Downloader, DownloaderConfig, Stage};
use tubefetch::engine::Engine;
use yt_dlp::{DownloadOptions, ProgressEvent, YtDlp};

const SCRIPT: &str = r#"case " $* " in
  *" --dump-json "*)
    echo '{"id": "abc123", "title": "Scripted", "duration": 61, "formats": [{"format_id": "22", "ext": "mp4", "height": 720, "filesize": 1024}]}'
    ;;
  *)
    echo 'yt-dlp-progress|downloading|512|1024|NA|256.0|2'
    echo 'yt-dlp-progress|downloading|1024|1024|NA|256.0|0'
    echo 'yt-dlp-progress|finished|1024|1024|NA|NA|NA'
    ;;
esac
"#;

fn scripted(dir: &TempDir) -> YtDlp {
    let script = dir.path().join("yt-dlp.sh");
    std::fs::write(&script, SCRIPT).expect("write script");

    let mut client = YtDlp::with_binary("sh");
    client.set_extra_args(vec![script.to_string_lossy().to_string()]);
    client
}

#[tokio::test]
async fn engine_forwards_every_progress_line() {
    let temp = TempDir::new().expect("temp dir");
    let engine = scripted(&temp);

    let mut seen: Vec<ProgressEvent> = Vec::new();
    engine
        .download("https://example.com/v", &DownloadOptions::new(), &mut |event: &ProgressEvent| {
            seen.push(event.clone());
        })
        .await
        .expect("download succeeds");

    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].percent(), Some(50.0));
    assert_eq!(seen[1].percent(), Some(100.0));
    assert!(seen[2].is_finished());
}

#[tokio::test]
async fn downloader_reports_progress_from_yt_dlp() {
    let temp = TempDir::new().expect("temp dir");
    let out = temp.path().join("downloads");
    let downloader = Downloader::new(Arc::new(scripted(&temp)), DownloaderConfig::new(&out));
    let mut listener = RecordingListener::default();

    let report = downloader
        .run("https://youtu.be/abc123", &mut listener)
        .await
        .expect("download succeeds");

    assert_eq!(report.title, "Scripted");
    assert_eq!(report.quality_label(), "720p");
    assert_eq!(report.size_label(), "1.0 KB");

    let downloading = listener.progress.iter().filter(|p| !p.is_finished()).count();
    assert_eq!(downloading, 2);
    assert_eq!(listener.progress.last().and_then(ProgressEvent::total), Some(1024));
    assert_eq!(listener.stages.last(), Some(&Stage::Completed));
    assert!(out.is_dir());
}
