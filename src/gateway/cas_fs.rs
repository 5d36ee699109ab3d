use crate::constants::CACHE_NAME_DELIMITER;
use crate::domain::RemoteFile;
use crate::error::Result;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Local path for `file` under `root`.
///
/// Files with a stable name live directly under `root`. Everything else is
/// content-addressed: `sha256/<hh>/<first 16 hex>-<url basename>`.
pub fn cache_path(root: &Path, file: &RemoteFile) -> PathBuf {
    if let Some(name) = &file.file_name {
        return root.join(name);
    }
    let hex = file.expected_sha256();
    let shard = hex.get(0..2).unwrap_or("00");
    let key = hex.get(0..16).unwrap_or(&hex);
    let basename = match file.url_basename() {
        "" => "download",
        b => b,
    };
    root.join("sha256")
        .join(shard)
        .join(format!("{}{}{}", key, CACHE_NAME_DELIMITER, basename))
}

/// Write `bytes` to `path` through a temporary sibling so readers never see a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
