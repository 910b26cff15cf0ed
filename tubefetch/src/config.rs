use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use yt_dlp::YtDlp;

use crate::downloader::DownloaderConfig;
use crate::select::TARGET_HEIGHT;

const DOWNLOAD_DIR_NAME: &str = "downloads";

#[derive(Debug, Parser)]
#[command(name = "tubefetch", version, about = "Download videos near 720p through yt-dlp")]
pub struct Cli {
    /// yt-dlp executable to run
    #[arg(long, env = "YTDLP_PATH", default_value = "yt-dlp", global = true)]
    pub ytdlp_path: PathBuf,

    #[arg(long, env = "FFMPEG_PATH", global = true)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Netscape-format cookies passed to yt-dlp
    #[arg(long, env = "COOKIES_FILE", global = true)]
    pub cookies_file: Option<PathBuf>,

    /// Where downloads are written. Defaults to `downloads/` next to the
    /// executable when serving, and the working directory in the console.
    #[arg(long, env = "DOWNLOAD_DIR", global = true)]
    pub download_dir: Option<PathBuf>,

    #[arg(long, env = "TARGET_HEIGHT", default_value_t = TARGET_HEIGHT, global = true)]
    pub target_height: u32,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the web form and the JSON download endpoint
    Serve {
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,

        #[arg(long, env = "STATIC_DIR", default_value = "static")]
        static_dir: PathBuf
    },
    /// Prompt for URLs on the terminal
    Console
}

impl Cli {
    pub fn engine(&self) -> YtDlp {
        let mut yt_dlp = YtDlp::with_binary(&self.ytdlp_path);
        yt_dlp.set_ffmpeg_location(self.ffmpeg_path.clone());
        yt_dlp.set_cookies_file(self.cookies_file.clone());
        yt_dlp
    }

    pub fn output_dir(&self) -> std::io::Result<PathBuf> {
        if let Some(ref dir) = self.download_dir {
            return Ok(dir.clone());
        }

        match self.command {
            Command::Serve { .. } => {
                let exe = std::env::current_exe()?;
                let base = exe.parent().map(Path::to_path_buf).unwrap_or_default();
                Ok(base.join(DOWNLOAD_DIR_NAME))
            }
            Command::Console => std::env::current_dir()
        }
    }

    pub fn downloader_config(&self) -> std::io::Result<DownloaderConfig> {
        Ok(DownloaderConfig {
            output_dir: self.output_dir()?,
            target_height: self.target_height
        })
    }

    /// Console output shares the terminal with the prompt, so it logs less.
    pub fn default_log_filter(&self) -> &'static str {
        match self.command {
            Command::Serve { .. } => "tubefetch=info,yt_dlp=info,tower_http=debug",
            Command::Console => "tubefetch=warn,yt_dlp=warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "tubefetch",
            "--download-dir",
            "/srv/videos",
            "--target-height",
            "1080",
            "serve",
            "--port",
            "8080",
            "--static-dir",
            "/srv/static"
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Serve {
            port: 8080,
            static_dir: PathBuf::from("/srv/static")
        });
        let config = cli.downloader_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/videos"));
        assert_eq!(config.target_height, 1080);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tubefetch", "console", "--download-dir", "/tmp/out"]).unwrap();
        assert_eq!(cli.command, Command::Console);
        assert_eq!(cli.output_dir().unwrap(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_serve_default_dir_is_next_to_executable() {
        let mut cli = Cli::try_parse_from(["tubefetch", "serve"]).unwrap();
        cli.download_dir = None;
        let dir = cli.output_dir().unwrap();
        assert!(dir.ends_with(DOWNLOAD_DIR_NAME));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["tubefetch"]).is_err());
    }

    #[test]
    fn test_log_filter_depends_on_mode() {
        let cli = Cli::try_parse_from(["tubefetch", "console"]).unwrap();
        assert!(cli.default_log_filter().starts_with("tubefetch=warn"));
    }
}
