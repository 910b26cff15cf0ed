use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::types::DownloadOptions;

/// First field of every machine-readable progress line.
pub const PROGRESS_MARKER: &str = "yt-dlp-progress";

/// Value for `--progress-template`. yt-dlp strips the `download:` type prefix
/// and prints the rest, so each line starts with [`PROGRESS_MARKER`]. Unknown
/// fields render as `NA`.
pub const PROGRESS_TEMPLATE: &str = concat!(
    "download:",
    "yt-dlp-progress",
    "|%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s",
    "|%(progress.total_bytes_estimate)s|%(progress.speed)s|%(progress.eta)s"
);

pub struct CommandBuilder {
    binary: PathBuf,
    args: Vec<String>
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        self.arg(url)
    }

    pub fn json_output(self) -> Self {
        self.arg("--dump-json")
    }

    pub fn skip_download(self) -> Self {
        self.arg("--skip-download")
    }

    pub fn no_playlist(self) -> Self {
        self.arg("--no-playlist")
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        self.arg("-f").arg(format)
    }

    pub fn merge_output_format(self, format: impl Into<String>) -> Self {
        self.arg("--merge-output-format").arg(format)
    }

    pub fn output_template(self, template: impl Into<String>) -> Self {
        self.arg("-o").arg(template)
    }

    pub fn quiet(self) -> Self {
        self.arg("--quiet")
    }

    pub fn no_warnings(self) -> Self {
        self.arg("--no-warnings")
    }

    pub fn ignore_errors(self) -> Self {
        self.arg("--ignore-errors")
    }

    /// Progress output stays on even under `--quiet`, one line per update.
    pub fn machine_progress(self) -> Self {
        self.arg("--progress")
            .arg("--newline")
            .arg("--progress-template")
            .arg(PROGRESS_TEMPLATE)
    }

    pub fn cookies_file_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self
                .arg("--cookies")
                .arg(p.to_string_lossy().to_string()),
            None => self
        }
    }

    pub fn ffmpeg_location(self, path: impl AsRef<Path>) -> Self {
        self.arg("--ffmpeg-location").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn with_options(mut self, options: &DownloadOptions) -> Self {
        if let Some(format_arg) = options.format.as_arg() {
            self = self.format(format_arg);
        }

        if let Some(container) = options.container.as_str() {
            self = self.merge_output_format(container);
        }

        if let Some(ref template) = options.output_template {
            self = self.output_template(template.clone());
        }

        if options.quiet {
            self = self.quiet();
        }

        if options.no_warnings {
            self = self.no_warnings();
        }

        if options.ignore_errors {
            self = self.ignore_errors();
        }

        self
    }

    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);
        cmd
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}
