// CompanyScope - app/fetch.rs
//
// Loading the record collection: one read of the whole dataset, from either
// a local JSON file or an HTTP endpoint.
//
// A failed load is never fatal. `load_store` logs the failure at error level
// and hands back an empty store so the dashboard still renders (empty table,
// zero stats, empty chart).

use crate::core::model::{Record, RecordStore};
use crate::util::constants::{APP_NAME, APP_VERSION, FETCH_TIMEOUT_SECS, MAX_SOURCE_FILE_SIZE};
use crate::util::error::{self, FetchError};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Where records come from.
pub trait RecordSource {
    /// Fetch the complete collection.
    fn fetch(&self) -> Result<Vec<Record>, FetchError>;

    /// Human-readable origin for diagnostics.
    fn describe(&self) -> String;
}

/// Parse a JSON array of records. `origin` names the source in errors.
pub fn parse_records(json: &str, origin: &str) -> Result<Vec<Record>, FetchError> {
    serde_json::from_str(json).map_err(|e| FetchError::Json {
        origin: origin.to_string(),
        source: e,
    })
}

// =============================================================================
// Local file
// =============================================================================

/// Records stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        let io_error = |e| FetchError::Io {
            path: self.path.clone(),
            source: e,
        };

        let size = std::fs::metadata(&self.path).map_err(io_error)?.len();
        if size > MAX_SOURCE_FILE_SIZE {
            return Err(FetchError::FileTooLarge {
                path: self.path.clone(),
                size,
                max_size: MAX_SOURCE_FILE_SIZE,
            });
        }

        let content = std::fs::read_to_string(&self.path).map_err(io_error)?;
        parse_records(&content, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Records served as a JSON array by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl RecordSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        let http_error = |e| FetchError::Http {
            url: self.url.clone(),
            source: e,
        };

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(http_error)?;

        let response = client
            .get(&self.url)
            .header(USER_AGENT, format!("{APP_NAME}/{APP_VERSION}"))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(http_error)?;
        parse_records(&body, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick the source for a location: `http://` and `https://` go over the
/// network, anything else is a file path.
pub fn source_for(location: &str) -> Box<dyn RecordSource> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Fetch once and build the record store.
///
/// On failure the error is logged and returned alongside an empty store.
pub fn load_store(source: &dyn RecordSource) -> (RecordStore, Option<FetchError>) {
    let origin = source.describe();
    let started = Instant::now();
    tracing::debug!(source = %origin, "Fetching records");

    match source.fetch() {
        Ok(records) => {
            tracing::info!(
                source = %origin,
                records = records.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Records loaded"
            );
            (RecordStore::new(records), None)
        }
        Err(e) => {
            tracing::error!(source = %origin, error = %e, "Error fetching data");
            (RecordStore::empty(), Some(e))
        }
    }
}

/// Fetch once and fail on any error, for runs that must not fall back to
/// an empty dashboard.
pub fn fetch_store(source: &dyn RecordSource) -> error::Result<RecordStore> {
    let records = source.fetch()?;
    tracing::info!(
        source = %source.describe(),
        records = records.len(),
        "Records loaded"
    );
    Ok(RecordStore::new(records))
}
