use crate::constants;
use crate::domain::RemoteFile;
use crate::error::{CoverageError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

static SHA256_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(sha256:)?[0-9a-fA-F]{64}$").expect("valid sha256 pattern"));

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Hit-call CSV files keyed by a human-readable category name.
    pub hit_calls: BTreeMap<String, RemoteFile>,
    pub mapping_db: RemoteFile,
    pub annotations: RemoteFile,
}

/// A configured remote file with its display name and the loader that reads it.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile<'a> {
    pub name: String,
    pub kind: &'static str,
    pub url: &'a str,
    pub sha256: &'a str,
}

impl<'a> SourceFile<'a> {
    fn new(name: String, kind: &'static str, file: &'a RemoteFile) -> Self {
        Self {
            name,
            kind,
            url: &file.url,
            sha256: &file.sha256,
        }
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_CACHE_DIR)
}

fn default_output() -> PathBuf {
    PathBuf::from(constants::DEFAULT_OUTPUT)
}

fn default_http_timeout_secs() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        let mut hit_calls = BTreeMap::new();
        hit_calls.insert(
            "A549".to_string(),
            RemoteFile::new(constants::PERISCOPE_A549_URL, constants::PERISCOPE_A549_SHA256),
        );
        hit_calls.insert(
            "HeLa_DMEM".to_string(),
            RemoteFile::new(
                constants::PERISCOPE_HELA_DMEM_URL,
                constants::PERISCOPE_HELA_DMEM_SHA256,
            ),
        );
        hit_calls.insert(
            "HeLa_HPLM".to_string(),
            RemoteFile::new(
                constants::PERISCOPE_HELA_HPLM_URL,
                constants::PERISCOPE_HELA_HPLM_SHA256,
            ),
        );

        Self {
            cache_dir: default_cache_dir(),
            output: default_output(),
            http_timeout_secs: default_http_timeout_secs(),
            hit_calls,
            mapping_db: RemoteFile::new(constants::MAPPING_DB_URL, constants::MAPPING_DB_SHA256)
                .with_file_name(constants::MAPPING_DB_FILE_NAME),
            annotations: RemoteFile::new(constants::LACOSTE_URL, constants::LACOSTE_SHA256),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CoverageError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded defaults, or the TOML file at `path` when one is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hit_calls.is_empty() {
            return Err(CoverageError::Config(
                "at least one hit-call file must be configured".to_string(),
            ));
        }
        // The category is parsed out of the content-addressed cache name
        if let Some((name, _)) = self.hit_calls.iter().find(|(_, f)| f.file_name.is_some()) {
            return Err(CoverageError::Config(format!(
                "hit-call source '{}' must not set file_name",
                name
            )));
        }
        for source in self.remote_files() {
            if !SHA256_HEX.is_match(source.sha256.trim()) {
                return Err(CoverageError::Config(format!(
                    "source '{}' has a malformed sha256 '{}'",
                    source.name, source.sha256
                )));
            }
            if source.url.trim().is_empty() {
                return Err(CoverageError::Config(format!(
                    "source '{}' has an empty url",
                    source.name
                )));
            }
        }
        Ok(())
    }

    /// Every remote file, in load order.
    pub fn remote_files(&self) -> Vec<SourceFile<'_>> {
        let mut files: Vec<SourceFile<'_>> = self
            .hit_calls
            .iter()
            .map(|(k, v)| {
                SourceFile::new(
                    format!("{}.{}", constants::HIT_CALL_SOURCE, k),
                    constants::HIT_CALL_SOURCE,
                    v,
                )
            })
            .collect();
        files.push(SourceFile::new(
            constants::MAPPING_DB_SOURCE.to_string(),
            constants::MAPPING_DB_SOURCE,
            &self.mapping_db,
        ));
        files.push(SourceFile::new(
            constants::ANNOTATION_SOURCE.to_string(),
            constants::ANNOTATION_SOURCE,
            &self.annotations,
        ));
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.hit_calls.len(), 3);
        assert_eq!(config.mapping_db.file_name.as_deref(), Some("babel"));
        assert_eq!(config.output, PathBuf::from("table.csv"));
    }

    #[test]
    fn parses_toml_with_defaults_for_paths() {
        let raw = r#"
            [hit_calls.A549]
            url = "https://example.org/x-A549_plate.csv"
            sha256 = "5f2309b4dbb65377dd756ac8bb94a4b8eae70cfb8bc7edd023c06eb6a9392b6b"

            [mapping_db]
            url = "https://example.org/babel.db"
            sha256 = "sha256:72180e7889c6c0c66a12e976c0645b5b3d873f77fc00ce106ede70c9fba1bfa7"
            file_name = "babel"

            [annotations]
            url = "https://example.org/lacoste.xlsx"
            sha256 = "26ED9FA3B4E8DEC9B1F44FFC1C6CE7887AD2DF1285298ECAD5EE3BE10A474563"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        config.validate().unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("data/cache"));
        assert_eq!(config.http_timeout_secs, 300);
        assert_eq!(config.remote_files().len(), 3);
    }

    #[test]
    fn rejects_malformed_hash() {
        let mut config = Config::default();
        config.annotations.sha256 = "not-a-hash".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CoverageError::Config(msg) if msg.contains("annotations")));
    }

    #[test]
    fn rejects_empty_hit_calls() {
        let mut config = Config::default();
        config.hit_calls.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_file_name_on_hit_calls() {
        let mut config = Config::default();
        let file = config.hit_calls["A549"].clone().with_file_name("a549.csv");
        config.hit_calls.insert("A549".to_string(), file);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CoverageError::Config(msg) if msg.contains("A549")));
    }

    #[test]
    fn remote_files_carry_their_kind() {
        let config = Config::default();
        let kinds: Vec<(String, &str)> = config
            .remote_files()
            .into_iter()
            .map(|f| (f.name, f.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("hit_calls.A549".to_string(), "hit_calls"),
                ("hit_calls.HeLa_DMEM".to_string(), "hit_calls"),
                ("hit_calls.HeLa_HPLM".to_string(), "hit_calls"),
                ("mapping_db".to_string(), "mapping_db"),
                ("annotations".to_string(), "annotations"),
            ]
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/coverage.toml")).unwrap_err();
        assert!(matches!(err, CoverageError::Config(_)));
    }
}
