use std::path::{Component, Path, PathBuf};
use url::Url;

pub fn is_http(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Derives the base reference for a source: the directory of an HTTP(S) URL
/// (with a trailing `/`) or the parent directory of a file path.
pub fn base_ref_for(source: &str) -> String {
    if is_http(source) {
        match Url::parse(source).and_then(|url| url.join(".")) {
            Ok(base) => base.to_string(),
            Err(e) => {
                log::debug!("cannot derive base from {:?}: {}", source, e);
                String::new()
            }
        }
    } else {
        Path::new(source)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Base {
    Http(Url),
    Directory(PathBuf),
}

/// Resolves references found in one manifest against that manifest's base.
///
/// A resolver belongs to a single source. Navigating to another manifest
/// means building a new one from the new manifest's base.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolver {
    base_ref: String,
    base: Base,
}

impl Resolver {
    pub fn new(base_ref: impl Into<String>) -> Self {
        let base_ref = base_ref.into();
        let base = match Url::parse(&base_ref) {
            Ok(url) if is_http(&base_ref) => Base::Http(url),
            _ => Base::Directory(PathBuf::from(&base_ref)),
        };

        Self { base_ref, base }
    }

    pub fn for_source(source: &str) -> Self {
        Self::new(base_ref_for(source))
    }

    pub fn base_ref(&self) -> &str {
        &self.base_ref
    }

    pub fn resolve(&self, relative: &str) -> String {
        if is_http(relative) {
            return relative.to_string();
        }

        match &self.base {
            Base::Http(base) => match base.join(relative) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    log::debug!("cannot resolve {:?} against {}: {}", relative, base, e);
                    relative.to_string()
                }
            },
            Base::Directory(dir) => join_lexically(dir, relative),
        }
    }
}

fn join_lexically(dir: &Path, relative: &str) -> String {
    let mut out = PathBuf::new();

    for component in dir.join(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }

    out.to_string_lossy().into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn http_base_keeps_directory() {
        assert_eq!(
            "https://example.com/video/",
            base_ref_for("https://example.com/video/master.m3u8?token=abc")
        );
        assert_eq!("https://example.com/", base_ref_for("https://example.com"));
    }

    #[test]
    fn file_base_is_parent() {
        assert_eq!("/local/path", base_ref_for("/local/path/master.m3u8"));
        assert_eq!("", base_ref_for("master.m3u8"));
    }

    #[test]
    fn absolute_urls_pass_through() {
        let resolver = Resolver::new("https://example.com/video/");
        let url = "https://other.com/segment.ts";
        assert_eq!(url, resolver.resolve(url));
        assert_eq!(url, resolver.resolve(&resolver.resolve(url)));
    }

    #[test]
    fn resolves_against_http_base() {
        let resolver = Resolver::for_source("https://example.com/video/master.m3u8");
        assert_eq!(
            "https://example.com/video/low/index.m3u8",
            resolver.resolve("low/index.m3u8")
        );
        assert_eq!(
            "https://example.com/audio/en.m3u8",
            resolver.resolve("../audio/en.m3u8")
        );
        assert_eq!("https://example.com/root.ts", resolver.resolve("/root.ts"));
        assert_eq!(
            "https://example.com/video/seg.ts?x=1",
            resolver.resolve("./seg.ts?x=1")
        );
    }

    #[test]
    fn resolves_against_directory() {
        let resolver = Resolver::new("/local/path");
        assert_eq!("/local/path/segment.ts", resolver.resolve("segment.ts"));
        assert_eq!("/local/other/a.ts", resolver.resolve("../other/./a.ts"));
        assert_eq!("/x.ts", resolver.resolve("../../../x.ts"));
    }

    #[test]
    fn relative_directory_base() {
        let resolver = Resolver::new("");
        assert_eq!("segment.ts", resolver.resolve("segment.ts"));
        assert_eq!("../segment.ts", resolver.resolve("../segment.ts"));

        let resolver = Resolver::new("streams/hd");
        assert_eq!("streams/seg.ts", resolver.resolve("../seg.ts"));
    }
}
