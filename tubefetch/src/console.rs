use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use yt_dlp::{FormatDescriptor, ProgressEvent, ProgressStatus, VideoMetadata};

use crate::display::{format_duration, progress_line, size_label};
use crate::downloader::{Downloader, ProgressListener, Stage};

const QUIT: &str = "q";
const PROMPT: &str = "Enter a video URL (q to quit): ";

/// Prints a download's progress to stdout.
pub struct ConsoleListener<W: Write + Send> {
    out: W
}

impl<W: Write + Send> ConsoleListener<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // A closed stdout is not worth aborting a download over.
    fn emit(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> ProgressListener for ConsoleListener<W> {
    fn on_stage(&mut self, stage: Stage) {
        match stage {
            Stage::FetchingMetadata => self.emit("Fetching video information...\n"),
            Stage::Downloading => self.emit("\nStarting download...\n"),
            _ => {}
        }
    }

    fn on_metadata(&mut self, metadata: &VideoMetadata) {
        let duration = format_duration(metadata.duration.unwrap_or(0.0));
        self.emit(&format!("\nTitle: {}\nDuration: {duration}\n", metadata.title()));
    }

    fn on_format(&mut self, format: Option<&FormatDescriptor>) {
        match format {
            Some(f) => {
                let height = f.height.unwrap_or(0);
                let size = size_label(f.estimated_size());
                self.emit(&format!("\nSelected quality: {height}p - {size}\n"));
            }
            None => self.emit("\nNo suitable format found, using default quality\n")
        }
    }

    fn on_progress(&mut self, event: &ProgressEvent) {
        match event.status {
            ProgressStatus::Downloading => {
                if let Some(line) = progress_line(event) {
                    self.emit(&format!("\r{line}"));
                }
            }
            ProgressStatus::Finished => self.emit("\nDownload complete! Processing...\n")
        }
    }
}

fn print_banner(out: &mut impl Write, target_height: u32) -> std::io::Result<()> {
    writeln!(out, "Video downloader (enter '{QUIT}' to quit)")?;
    writeln!(out, "Tips:")?;
    writeln!(out, "1. Downloads are handled by yt-dlp")?;
    writeln!(out, "2. The resolution closest to {target_height}p is picked automatically")?;
    writeln!(out, "3. Download speed and remaining time are shown live\n")?;
    out.flush()
}

fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(QUIT)
}

/// Interactive loop: one URL per line until `q` or end of input.
pub async fn run(downloader: &Downloader) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    print_banner(&mut stdout, downloader.config().target_height)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        if is_quit(&line) {
            break;
        }

        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        let mut listener = ConsoleListener::new(std::io::stdout());
        match downloader.run(url, &mut listener).await {
            Ok(report) => println!(
                "\nSaved \"{}\" to {}\n",
                report.title,
                downloader.config().output_dir.display()
            ),
            Err(e) => println!("\n{e}\n")
        }
    }

    Ok(())
}
