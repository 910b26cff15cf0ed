use crate::downloader::Downloader;

#[derive(Clone)]
pub struct AppState {
    pub downloader: Downloader
}
