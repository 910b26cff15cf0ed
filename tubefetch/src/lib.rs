//! Web and console front-end over yt-dlp.
//!
//! Both entry points hand a URL to [`downloader::Downloader`], which
//! normalizes it, asks the engine for metadata, picks the mp4 format closest
//! to the target height and then runs the download while reporting progress
//! to a [`downloader::ProgressListener`].

pub mod config;
pub mod console;
pub mod display;
pub mod downloader;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod router;
pub mod select;
pub mod state;
pub mod url;
