//! Parsing core for HLS playlists.
//!
//! Turns playlist text into a [`Manifest`], resolves references relative to
//! the playlist's location and finds the lines a reader can follow. Nothing
//! here performs I/O and nothing here fails on malformed content.

mod attributes;
mod manifest;
mod models;
mod navigation;
mod parser;
mod resolver;
mod tag;

pub use attributes::{parse_attributes, split_attributes, unquote};
pub use manifest::{classify, classify_lines, Manifest};
pub use models::{
    AttributeMap, ClassifiedLine, Key, LineKind, ManifestKind, Map, Segment, Tag, Variant,
};
pub use navigation::{extract_navigable_items, navigable_target, NavigableItems};
pub use resolver::{base_ref_for, is_http, Resolver};
pub use tag::{TagKind, TagLine};
