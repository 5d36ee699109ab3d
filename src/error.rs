use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Integrity check failed for {url}: expected sha256 {expected}, got {actual}")]
    Integrity {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("Source '{source_name}' is missing required column '{column}'")]
    Schema { source_name: String, column: String },

    #[error("Origin column '{origin}' is produced by both '{first}' and '{second}'")]
    OriginCollision {
        origin: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, CoverageError>;
