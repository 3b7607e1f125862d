use crate::models::AttributeMap;

/// Splits an attribute list on top-level commas.
///
/// A `"` toggles quoting and stays in the segment, so `B="x,y"` survives as
/// one segment. An unbalanced quote swallows the rest of the input. Segments
/// are trimmed and empty ones are dropped.
pub fn split_attributes(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                push_segment(&mut parts, &input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_segment(&mut parts, &input[start..]);

    parts
}

fn push_segment<'a>(parts: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        parts.push(segment);
    }
}

/// Splits a single `KEY=VALUE` segment, unquoting the value.
pub fn split_pair(segment: &str) -> Option<(&str, &str)> {
    let (key, value) = segment.split_once('=')?;
    Some((key.trim(), unquote(value.trim())))
}

/// Strips exactly one layer of surrounding double quotes.
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parses an attribute list into a key/value map.
///
/// Segments without `=` are dropped and later duplicates overwrite earlier
/// ones. Never fails.
pub fn parse_attributes(input: &str) -> AttributeMap {
    let mut attrs = AttributeMap::new();

    for segment in split_attributes(input) {
        match split_pair(segment) {
            Some((key, value)) => {
                attrs.insert(key.to_string(), value.to_string());
            }
            None => log::debug!("dropping attribute segment without '=': {:?}", segment),
        }
    }

    attrs
}
