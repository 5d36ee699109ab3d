//! Data shapes shared by the loaders, the reshaper and the reconciler.

use serde::Deserialize;

/// A single long-form observation: `gene` was seen under `origin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneRecord {
    pub gene: String,
    pub origin: String,
}

impl GeneRecord {
    pub fn new(gene: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            origin: origin.into(),
        }
    }
}

/// Everything one loader produced, in emission order.
#[derive(Debug, Clone, Default)]
pub struct TidyTable {
    pub source: String,
    pub records: Vec<GeneRecord>,
}

impl TidyTable {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, gene: impl Into<String>, origin: impl Into<String>) {
        self.records.push(GeneRecord::new(gene, origin));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A remote file pinned by its SHA-256 content hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFile {
    pub url: String,
    pub sha256: String,
    /// Stable local name inside the cache; content-addressed when absent.
    #[serde(default)]
    pub file_name: Option<String>,
}

impl RemoteFile {
    pub fn new(url: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            sha256: sha256.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Expected hash as bare lowercase hex (accepts a `sha256:` prefix).
    pub fn expected_sha256(&self) -> String {
        let raw = self.sha256.trim();
        raw.strip_prefix("sha256:").unwrap_or(raw).to_ascii_lowercase()
    }

    /// Last path segment of the URL, without query string.
    pub fn url_basename(&self) -> &str {
        let path = self.url.split(['?', '#']).next().unwrap_or("");
        path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
    }
}
