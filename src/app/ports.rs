use crate::domain::RemoteFile;
use crate::error::Result;
use std::path::PathBuf;

// Retrieval-side ports

pub trait HttpClientPort {
    fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Fetch a pinned remote file and return a local path whose content matches its hash.
pub trait RetrieverPort {
    fn fetch(&self, file: &RemoteFile) -> Result<PathBuf>;
}
