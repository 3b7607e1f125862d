mod error;
mod parser;
mod source;

pub use error::{Error, Result};
pub use hls_parser::{
    extract_navigable_items, is_http, ClassifiedLine, Key, LineKind, Manifest, ManifestKind, Map,
    NavigableItems, Resolver, Segment, Tag, Variant,
};
pub use parser::{FetchOptions, Parser};
pub use source::{follow, Source};
