use crate::error::{Error, Result};
use hls_parser::{is_http, Manifest};
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use url::Url;

/// Where a manifest comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    File(PathBuf),
}

impl Source {
    /// Command-line rule: anything starting with `http` is a URL, everything
    /// else a local path.
    pub fn parse(arg: &str) -> Result<Self> {
        if arg.starts_with("http") {
            Self::url(arg)
        } else {
            Ok(Self::file(arg))
        }
    }

    /// Strict rule for references taken from a manifest: only `http://` and
    /// `https://` are URLs, so a directory named `httpdocs` stays a path.
    pub fn from_resolved(reference: &str) -> Result<Self> {
        if is_http(reference) {
            Self::url(reference)
        } else {
            Ok(Self::file(reference))
        }
    }

    pub fn url(url: &str) -> Result<Self> {
        Url::parse(url)
            .map(Self::Url)
            .map_err(|source| Error::InvalidUrl {
                url: url.to_string(),
                source,
            })
    }

    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// The identifier a manifest parsed from this source records.
    pub fn identifier(&self) -> String {
        match self {
            Self::Url(url) => url.to_string(),
            Self::File(path) => path.to_string_lossy().into_owned(),
        }
    }

    /// The source a manifest was parsed from, for refreshing it.
    pub fn of(manifest: &Manifest) -> Result<Self> {
        Self::from_resolved(manifest.source())
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The source behind the navigable item on `line`, resolved against the
/// manifest's own location.
pub fn follow(manifest: &Manifest, line: usize) -> Result<Source> {
    let items = manifest.navigable_items();
    let target = items.get(&line).ok_or(Error::NotNavigable(line))?;
    let resolved = manifest.resolver().resolve(target);
    log::debug!("line {} -> {}", line, resolved);
    Source::from_resolved(&resolved)
}
