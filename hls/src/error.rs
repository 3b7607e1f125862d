use std::path::PathBuf;

/// Failures acquiring a manifest. Parsing itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to fetch manifest: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("line {0} has nothing to follow")]
    NotNavigable(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
