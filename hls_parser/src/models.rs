use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type AttributeMap = HashMap<String, String>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    Master,
    Media,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Tag,
    Uri,
    Comment,
    Empty,
}

impl LineKind {
    pub fn of(content: &str) -> Self {
        if content.is_empty() {
            Self::Empty
        } else if content.starts_with("#EXT") {
            Self::Tag
        } else if content.starts_with('#') {
            Self::Comment
        } else {
            Self::Uri
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub number: usize,
    pub content: String,
    pub kind: LineKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub uri: String,
    pub bandwidth: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codecs: Option<String>,
    pub attributes: AttributeMap,
}

/// Encryption state from an `EXT-X-KEY` tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_format: Option<String>,
}

impl Key {
    pub fn from_attributes(attrs: &AttributeMap) -> Self {
        Self {
            method: attrs.get("METHOD").cloned().unwrap_or_default(),
            uri: attrs.get("URI").cloned(),
            iv: attrs.get("IV").cloned(),
            key_format: attrs.get("KEYFORMAT").cloned(),
        }
    }

    /// `METHOD=NONE` switches encryption off for the segments that follow.
    pub fn disables_encryption(&self) -> bool {
        self.method == "NONE"
    }

    pub fn is_encrypting(&self) -> bool {
        !self.method.is_empty() && !self.disables_encryption()
    }
}

/// Initialization section from an `EXT-X-MAP` tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_range: Option<String>,
}

impl Map {
    pub fn from_attributes(attrs: &AttributeMap) -> Self {
        Self {
            uri: attrs.get("URI").cloned().unwrap_or_default(),
            byte_range: attrs.get("BYTERANGE").cloned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub uri: String,
    pub duration: f64,
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<Map>,
}

/// A tag line as written. `name` is stored without the leading `#`
/// (`EXT-X-KEY`, not `#EXT-X-KEY`), which is also how it appears in JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: AttributeMap,
    pub line_number: usize,
}
