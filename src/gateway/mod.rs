pub mod cas_fs;

use crate::app::ports::{HttpClientPort, RetrieverPort};
use crate::domain::RemoteFile;
use crate::error::{CoverageError, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Download gateway backed by a local cache directory.
///
/// A cached file is trusted only while its SHA-256 matches the pinned hash.
/// Downloaded bytes are verified before they are written, so the cache never
/// holds content that failed the integrity check.
pub struct CacheGateway {
    root: PathBuf,
    http: Box<dyn HttpClientPort>,
}

impl CacheGateway {
    pub fn new<P: Into<PathBuf>>(root: P, http: Box<dyn HttpClientPort>) -> Self {
        Self { root: root.into(), http }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn download(&self, file: &RemoteFile, expected: &str, target: &std::path::Path) -> Result<()> {
        let t0 = Instant::now();
        let resp = self.http.get(&file.url)?;
        if !resp.is_success() {
            return Err(CoverageError::HttpStatus {
                url: file.url.clone(),
                status: resp.status,
            });
        }

        let actual = cas_fs::sha256_hex(&resp.bytes);
        if actual != expected {
            return Err(CoverageError::Integrity {
                url: file.url.clone(),
                expected: expected.to_string(),
                actual,
            });
        }

        cas_fs::write_atomic(target, &resp.bytes)?;
        info!(
            "Downloaded {} ({} bytes, {}) in {:.2}s",
            file.url,
            resp.bytes.len(),
            resp.content_type,
            t0.elapsed().as_secs_f64()
        );
        Ok(())
    }
}

impl RetrieverPort for CacheGateway {
    fn fetch(&self, file: &RemoteFile) -> Result<PathBuf> {
        let expected = file.expected_sha256();
        let target = cas_fs::cache_path(&self.root, file);

        if target.is_file() {
            let cached = cas_fs::sha256_file(&target)?;
            if cached == expected {
                debug!("Cache hit for {} at {}", file.url, target.display());
                return Ok(target);
            }
            warn!(
                "Cached file {} has sha256 {}, expected {}; downloading again",
                target.display(),
                cached,
                expected
            );
            fs::remove_file(&target)?;
        }

        self.download(file, &expected, &target)?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::HttpGetResult;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;

    struct FakeHttp {
        responses: HashMap<String, (u16, Vec<u8>)>,
        calls: Rc<Cell<usize>>,
    }

    impl HttpClientPort for FakeHttp {
        fn get(&self, url: &str) -> Result<HttpGetResult> {
            self.calls.set(self.calls.get() + 1);
            let (status, bytes) = self.responses.get(url).cloned().unwrap_or((404, Vec::new()));
            Ok(HttpGetResult {
                status,
                bytes,
                content_type: "text/csv".to_string(),
            })
        }
    }

    fn gateway_serving(url: &str, status: u16, body: &[u8]) -> (tempfile::TempDir, CacheGateway, Rc<Cell<usize>>) {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let mut responses = HashMap::new();
        responses.insert(url.to_string(), (status, body.to_vec()));
        let http = FakeHttp { responses, calls: calls.clone() };
        let gw = CacheGateway::new(dir.path().join("cache"), Box::new(http));
        (dir, gw, calls)
    }

    const URL: &str = "https://example.org/outputs/A549_plate_level_hits.csv";
    const BODY: &[u8] = b"Gene,score\nTP53,1.0\n";

    #[test]
    fn second_fetch_is_served_from_cache() {
        let (_dir, gw, calls) = gateway_serving(URL, 200, BODY);
        let file = RemoteFile::new(URL, cas_fs::sha256_hex(BODY));

        let first = gw.fetch(&file).unwrap();
        let second = gw.fetch(&file).unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(fs::read(&first).unwrap(), BODY);
    }

    #[test]
    fn hash_mismatch_aborts_without_caching() {
        let (_dir, gw, _calls) = gateway_serving(URL, 200, BODY);
        let file = RemoteFile::new(URL, "0".repeat(64));

        let err = gw.fetch(&file).unwrap_err();
        assert!(matches!(err, CoverageError::Integrity { .. }));
        assert!(!cas_fs::cache_path(gw.root(), &file).exists());
    }

    #[test]
    fn stale_cache_entry_is_replaced() {
        let (_dir, gw, calls) = gateway_serving(URL, 200, BODY);
        let file = RemoteFile::new(URL, cas_fs::sha256_hex(BODY));
        let target = cas_fs::cache_path(gw.root(), &file);
        cas_fs::write_atomic(&target, b"truncated").unwrap();

        let path = gw.fetch(&file).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(fs::read(path).unwrap(), BODY);
    }

    #[test]
    fn non_success_status_is_a_network_failure() {
        let (_dir, gw, _calls) = gateway_serving(URL, 503, b"");
        let file = RemoteFile::new(URL, cas_fs::sha256_hex(BODY));
        let err = gw.fetch(&file).unwrap_err();
        assert!(matches!(err, CoverageError::HttpStatus { status: 503, .. }));
    }
}
