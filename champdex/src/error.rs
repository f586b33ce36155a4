//! Error types for the feed client and the curated data loaders.

use std::path::PathBuf;

/// The remote roster feed could not provide a snapshot.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("version list is empty")]
    EmptyVersionList,
}

/// A curated dataset or the favorites file could not be read as a whole.
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
