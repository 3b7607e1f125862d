use clap::{ArgGroup, Parser};
use hls::Source;
use std::time::Duration;

/// Explore an HLS manifest from a URL or a local file.
#[derive(Debug, Parser)]
#[clap(version, about)]
#[clap(group(ArgGroup::new("input").required(true).args(["source", "url", "file"])))]
pub struct Args {
    /// Manifest URL or file path; values starting with `http` are fetched
    pub source: Option<String>,

    /// HLS manifest URL
    #[clap(long, short)]
    pub url: Option<String>,

    /// Local HLS manifest file path
    #[clap(long, short)]
    pub file: Option<String>,

    /// Follow the navigable item on this line; repeat to drill further down
    #[clap(long, short = 'F', value_name = "LINE")]
    pub follow: Vec<usize>,

    /// Print the parsed manifest as JSON
    #[clap(long)]
    pub json: bool,

    /// List navigable lines and the targets they resolve to
    #[clap(long, short)]
    pub items: bool,

    /// Show details for the segment with this sequence number
    #[clap(long, short, value_name = "SEQUENCE")]
    pub segment: Option<u64>,

    /// Refresh every N seconds and report new segments
    #[clap(long, short, value_name = "SECONDS")]
    pub watch: Option<u64>,

    /// HTTP request timeout in seconds
    #[clap(long, short, default_value_t = 30)]
    pub timeout: u64,

    /// Log at debug level unless RUST_LOG says otherwise
    #[clap(long, short)]
    pub verbose: bool,
}

impl Args {
    pub fn source(&self) -> hls::Result<Source> {
        if let Some(url) = &self.url {
            return Source::url(url);
        }
        if let Some(file) = &self.file {
            return Ok(Source::file(file));
        }
        Source::parse(self.source.as_deref().unwrap_or_default())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn positional_url() {
        let args = Args::parse_from(["hls_explorer", "https://example.com/master.m3u8"]);
        assert!(matches!(args.source(), Ok(Source::Url(_))));
        assert_eq!(Duration::from_secs(30), args.timeout());
    }

    #[test]
    fn file_flag() {
        let args = Args::parse_from(["hls_explorer", "--file", "https://not-a-url.m3u8"]);
        assert_eq!(Source::file("https://not-a-url.m3u8"), args.source().unwrap());
    }

    #[test]
    fn repeated_follow() {
        let args = Args::parse_from(["hls_explorer", "-u", "http://a/b.m3u8", "-F", "3", "-F", "7"]);
        assert_eq!(vec![3, 7], args.follow);
    }

    #[test]
    fn inputs_conflict() {
        assert!(Args::try_parse_from(["hls_explorer", "-u", "http://a", "-f", "b"]).is_err());
        assert!(Args::try_parse_from(["hls_explorer"]).is_err());
    }
}
