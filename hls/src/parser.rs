use crate::error::{Error, Result};
use crate::source::Source;
use hls_parser::{Manifest, Resolver};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
    pub timeout: Option<Duration>,
}

/// Acquires manifests and remembers the base of the last one parsed.
///
/// `resolve` answers for the most recent manifest only. When following a
/// reference into another manifest, use a fresh `Parser` so two sources never
/// share a resolver.
#[derive(Debug)]
pub struct Parser {
    client: Client,
    resolver: Option<Resolver>,
    source: Option<Source>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            resolver: None,
            source: None,
        }
    }

    pub fn with_options(options: &FetchOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            resolver: None,
            source: None,
        })
    }

    pub async fn load(&mut self, source: &Source) -> Result<Manifest> {
        let manifest = match source {
            Source::Url(url) => {
                let text = self.fetch(url).await?;
                self.parse_from_bytes(text.as_bytes(), url.as_str())
            }
            Source::File(path) => self.read_file(path).await?,
        };
        self.source = Some(source.clone());
        Ok(manifest)
    }

    pub async fn parse_from_url(&mut self, url: &str) -> Result<Manifest> {
        let source = Source::url(url)?;
        self.load(&source).await
    }

    pub async fn parse_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Manifest> {
        self.load(&Source::file(path)).await
    }

    async fn read_file(&mut self, path: &Path) -> Result<Manifest> {
        log::info!("reading {}", path.display());

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(self.parse_from_bytes(text.as_bytes(), &path.to_string_lossy()))
    }

    pub fn parse_from_bytes(&mut self, bytes: &[u8], source: &str) -> Manifest {
        let manifest = Manifest::from_bytes(bytes, source);
        self.resolver = Some(manifest.resolver());
        self.source = None;
        manifest
    }

    /// Re-acquires `manifest`'s source. The old manifest is left untouched.
    pub async fn refresh(&mut self, manifest: &Manifest) -> Result<Manifest> {
        let source = self.source_of(manifest)?;
        self.load(&source).await
    }

    /// The source `manifest` was loaded from. When this parser loaded it, the
    /// original `Source` is reused rather than guessed from the identifier.
    fn source_of(&self, manifest: &Manifest) -> Result<Source> {
        match &self.source {
            Some(source) if source.identifier() == manifest.source() => Ok(source.clone()),
            _ => Source::of(manifest),
        }
    }

    /// Resolves a reference from the last parsed manifest. Before anything has
    /// been parsed the reference is returned unchanged.
    pub fn resolve(&self, relative: &str) -> String {
        match &self.resolver {
            Some(resolver) => resolver.resolve(relative),
            None => relative.to_string(),
        }
    }

    pub fn base_ref(&self) -> Option<&str> {
        self.resolver.as_ref().map(Resolver::base_ref)
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        log::info!("fetching {}", url);

        let res = self.client.get(url.clone()).send().await?;
        if res.status() != StatusCode::OK {
            log::warn!("{} -> {}", url, res.status());
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: res.status().as_u16(),
            });
        }

        Ok(res.text().await?)
    }
}
