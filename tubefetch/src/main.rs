use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubefetch::config::{Cli, Command};
use tubefetch::console;
use tubefetch::downloader::Downloader;
use tubefetch::router::create_router;
use tubefetch::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.default_log_filter().into())
        )
        .init();

    let yt_dlp = cli.engine();
    match yt_dlp.check_binary().await {
        Ok(version) => tracing::info!("yt-dlp version: {}", version),
        Err(e) => tracing::warn!("yt-dlp not found or not executable: {}", e)
    }

    let config = cli.downloader_config()?;
    tracing::info!("Downloads go to {}", config.output_dir.display());

    let downloader = Downloader::new(Arc::new(yt_dlp), config);

    match cli.command {
        Command::Serve { port, static_dir } => {
            let app = create_router(AppState { downloader }, &static_dir);

            let addr = format!("0.0.0.0:{port}");
            tracing::info!("listening on {}", addr);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }
        Command::Console => console::run(&downloader).await?
    }

    Ok(())
}
