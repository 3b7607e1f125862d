use crate::attributes::split_attributes;
use crate::parser::quoted_string;
use std::collections::BTreeMap;

/// Line number (1-based) to the reference a reader can follow from it.
pub type NavigableItems = BTreeMap<usize, String>;

const URI_BEARING_TAGS: [&str; 2] = ["#EXT-X-I-FRAME-STREAM-INF:", "#EXT-X-MEDIA:"];

/// Scans manifest text for followable references: every URI line, plus the
/// `URI` attribute of I-frame variants and alternate renditions.
pub fn extract_navigable_items(text: &str) -> NavigableItems {
    text.split('\n')
        .enumerate()
        .filter_map(|(i, line)| navigable_target(line.trim()).map(|uri| (i + 1, uri.to_string())))
        .collect()
}

/// The target of a single trimmed line, if it has one.
pub fn navigable_target(line: &str) -> Option<&str> {
    if line.is_empty() {
        return None;
    }
    if !line.starts_with('#') {
        return Some(line);
    }

    let attrs = URI_BEARING_TAGS
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))?;
    uri_attribute(attrs)
}

fn uri_attribute(attrs: &str) -> Option<&str> {
    let raw = split_attributes(attrs).into_iter().find_map(|segment| {
        let (key, value) = segment.split_once('=')?;
        (key.trim() == "URI").then(|| value.trim())
    })?;

    let uri = if raw.starts_with('"') {
        // read to the next quote, no escapes
        quoted_string(raw).ok()?.1
    } else {
        raw
    };

    (!uri.is_empty()).then_some(uri)
}
