use crate::attributes::parse_attributes;
use crate::models::Tag;
use crate::parser::tag_line;

/// Tags the builders act on. Everything else is recorded but not interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TagKind {
    M3u,
    Version,
    StreamInf,
    IFrameStreamInf,
    Media,
    TargetDuration,
    MediaSequence,
    Inf,
    ByteRange,
    Key,
    Map,
    EndList,
    Other,
}

impl TagKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "EXTM3U" => Self::M3u,
            "EXT-X-VERSION" => Self::Version,
            "EXT-X-STREAM-INF" => Self::StreamInf,
            "EXT-X-I-FRAME-STREAM-INF" => Self::IFrameStreamInf,
            "EXT-X-MEDIA" => Self::Media,
            "EXT-X-TARGETDURATION" => Self::TargetDuration,
            "EXT-X-MEDIA-SEQUENCE" => Self::MediaSequence,
            "EXTINF" => Self::Inf,
            "EXT-X-BYTERANGE" => Self::ByteRange,
            "EXT-X-KEY" => Self::Key,
            "EXT-X-MAP" => Self::Map,
            "EXT-X-ENDLIST" => Self::EndList,
            _ => Self::Other,
        }
    }
}

/// A tag line split into its name and optional value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TagLine<'a> {
    pub kind: TagKind,
    pub name: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> TagLine<'a> {
    /// Returns `None` unless `line` starts with `#EXT`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (_, (name, value)) = tag_line(line).ok()?;
        Some(Self {
            kind: TagKind::from_name(name),
            name,
            value,
        })
    }

    /// The tag value, or `""` for a bare tag.
    pub fn value_or_empty(&self) -> &'a str {
        self.value.unwrap_or("")
    }

    pub fn to_tag(&self, line_number: usize) -> Tag {
        Tag {
            name: self.name.to_string(),
            raw_value: self.value.map(str::to_string),
            attributes: self.value.map(parse_attributes).unwrap_or_default(),
            line_number,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dispatches_known_names() {
        assert_eq!(TagKind::Inf, TagKind::from_name("EXTINF"));
        assert_eq!(TagKind::Media, TagKind::from_name("EXT-X-MEDIA"));
        assert_eq!(TagKind::MediaSequence, TagKind::from_name("EXT-X-MEDIA-SEQUENCE"));
        assert_eq!(TagKind::Other, TagKind::from_name("EXT-X-DISCONTINUITY"));
    }

    #[test]
    fn bare_tag_has_no_value() {
        let tag = TagLine::parse("#EXT-X-ENDLIST").unwrap().to_tag(9);
        assert_eq!("EXT-X-ENDLIST", tag.name);
        assert_eq!(None, tag.raw_value);
        assert!(tag.attributes.is_empty());
        assert_eq!(9, tag.line_number);
    }

    #[test]
    fn tag_with_attributes() {
        let line = r#"#EXT-X-MAP:URI="init.mp4",BYTERANGE="720@0""#;
        let tag = TagLine::parse(line).unwrap().to_tag(3);
        assert_eq!("EXT-X-MAP", tag.name);
        assert_eq!(Some(r#"URI="init.mp4",BYTERANGE="720@0""#), tag.raw_value.as_deref());
        assert_eq!("init.mp4", tag.attributes["URI"]);
        assert_eq!("720@0", tag.attributes["BYTERANGE"]);
    }

    #[test]
    fn non_tag_lines() {
        assert_eq!(None, TagLine::parse("# just a comment"));
        assert_eq!(None, TagLine::parse("low/index.m3u8"));
    }
}
