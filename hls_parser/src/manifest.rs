use crate::attributes::parse_attributes;
use crate::models::{
    ClassifiedLine, Key, LineKind, ManifestKind, Map, Segment, Tag, Variant,
};
use crate::navigation::{extract_navigable_items, NavigableItems};
use crate::parser::extinf_duration;
use crate::resolver::{base_ref_for, Resolver};
use crate::tag::{TagKind, TagLine};
use serde::{Deserialize, Serialize};

const MASTER_TAGS: [&str; 2] = ["#EXT-X-STREAM-INF", "#EXT-X-I-FRAME-STREAM-INF"];

/// Decides whether `text` is a master playlist.
///
/// Only lines that start with a variant tag count, so a comment mentioning
/// `#EXT-X-STREAM-INF` does not turn a media playlist into a master one.
pub fn classify(text: &str) -> ManifestKind {
    let is_master = text
        .lines()
        .map(str::trim)
        .any(|line| MASTER_TAGS.iter().any(|tag| line.starts_with(tag)));

    if is_master {
        ManifestKind::Master
    } else {
        ManifestKind::Media
    }
}

pub fn classify_lines(text: &str) -> Vec<ClassifiedLine> {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let content = line.trim();
            ClassifiedLine {
                number: i + 1,
                content: content.to_string(),
                kind: LineKind::of(content),
            }
        })
        .collect()
}

/// Integer tag values are unsigned; a negative number is ignored.
fn parse_int(tag: &TagLine) -> Option<u64> {
    let value = tag.value?.trim();
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            log::debug!("ignoring non-integer {}: {:?}", tag.name, value);
            None
        }
    }
}

/// Parsed playlist. Built once per source and never modified; refreshing a
/// source produces a new value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "type")]
    kind: ManifestKind,
    source: String,
    raw_text: String,
    lines: Vec<ClassifiedLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    segments: Vec<Segment>,
    tags: Vec<Tag>,
    base_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_duration: Option<u64>,
    version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_sequence: Option<u64>,
}

impl Manifest {
    /// Parses playlist text read from `source` (a URL or file path).
    ///
    /// Never fails: malformed numbers, attributes and quoting degrade to
    /// empty or zero values and the rest of the document is still parsed.
    pub fn parse(text: &str, source: &str) -> Self {
        let lines = classify_lines(text);
        let tags = lines
            .iter()
            .filter(|line| line.kind == LineKind::Tag)
            .filter_map(|line| TagLine::parse(&line.content).map(|tag| tag.to_tag(line.number)))
            .collect();
        let kind = classify(text);

        let mut manifest = Self {
            kind,
            source: source.to_string(),
            raw_text: text.to_string(),
            lines: Vec::new(),
            variants: Vec::new(),
            segments: Vec::new(),
            tags,
            base_ref: base_ref_for(source),
            target_duration: None,
            version: 0,
            media_sequence: None,
        };

        match kind {
            ManifestKind::Master => {
                let built = lines.iter().fold(MasterBuilder::default(), MasterBuilder::step);
                manifest.variants = built.variants;
                manifest.version = built.version.unwrap_or(0);
            }
            ManifestKind::Media => {
                let built = lines.iter().fold(MediaBuilder::default(), MediaBuilder::step);
                manifest.segments = built.segments;
                manifest.version = built.version.unwrap_or(0);
                manifest.target_duration = built.target_duration;
                manifest.media_sequence = built.media_sequence;
            }
        }
        manifest.lines = lines;

        log::debug!(
            "parsed {:?} manifest from {}: {} variants, {} segments, {} tags",
            manifest.kind,
            manifest.source,
            manifest.variants.len(),
            manifest.segments.len(),
            manifest.tags.len()
        );

        manifest
    }

    /// Like [`Manifest::parse`] for raw bytes; invalid UTF-8 is replaced.
    pub fn from_bytes(bytes: &[u8], source: &str) -> Self {
        Self::parse(&String::from_utf8_lossy(bytes), source)
    }

    pub fn kind(&self) -> ManifestKind {
        self.kind
    }

    pub fn is_master(&self) -> bool {
        self.kind == ManifestKind::Master
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn lines(&self) -> &[ClassifiedLine] {
        &self.lines
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, sequence: u64) -> Option<&Segment> {
        self.segments.iter().find(|s| s.sequence == sequence)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn base_ref(&self) -> &str {
        &self.base_ref
    }

    pub fn target_duration(&self) -> Option<u64> {
        self.target_duration
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn media_sequence(&self) -> Option<u64> {
        self.media_sequence
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.base_ref.clone())
    }

    pub fn navigable_items(&self) -> NavigableItems {
        extract_navigable_items(&self.raw_text)
    }

    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    pub fn encrypted_segments(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.key.as_ref().map_or(false, Key::is_encrypting))
            .count()
    }
}

#[derive(Debug, Default)]
struct MasterBuilder {
    pending: Option<Variant>,
    variants: Vec<Variant>,
    version: Option<u64>,
}

impl MasterBuilder {
    fn step(mut self, line: &ClassifiedLine) -> Self {
        match line.kind {
            LineKind::Tag => {
                if let Some(tag) = TagLine::parse(&line.content) {
                    self.tag(&tag);
                }
            }
            LineKind::Uri => match self.pending.take() {
                Some(mut variant) => {
                    variant.uri = line.content.clone();
                    self.variants.push(variant);
                }
                None => log::debug!("line {}: URI without EXT-X-STREAM-INF", line.number),
            },
            LineKind::Comment | LineKind::Empty => {}
        }
        self
    }

    fn tag(&mut self, tag: &TagLine) {
        log::trace!("master tag {:?}", tag.kind);
        match tag.kind {
            TagKind::Version => {
                if let Some(version) = parse_int(tag) {
                    self.version = Some(version);
                }
            }
            TagKind::StreamInf => {
                let attributes = parse_attributes(tag.value_or_empty());
                let bandwidth = match attributes.get("BANDWIDTH").map(|b| b.parse::<u64>()) {
                    Some(Ok(bandwidth)) => bandwidth,
                    Some(Err(_)) => {
                        log::debug!("unparsable BANDWIDTH {:?}", attributes["BANDWIDTH"]);
                        0
                    }
                    None => 0,
                };
                self.pending = Some(Variant {
                    uri: String::new(),
                    bandwidth,
                    resolution: attributes.get("RESOLUTION").cloned(),
                    codecs: attributes.get("CODECS").cloned(),
                    attributes,
                });
            }
            TagKind::M3u
            | TagKind::IFrameStreamInf
            | TagKind::Media
            | TagKind::TargetDuration
            | TagKind::MediaSequence
            | TagKind::Inf
            | TagKind::ByteRange
            | TagKind::Key
            | TagKind::Map
            | TagKind::EndList
            | TagKind::Other => {}
        }
    }
}

#[derive(Debug, Default)]
struct MediaBuilder {
    pending: Option<Segment>,
    key: Option<Key>,
    map: Option<Map>,
    next_sequence: u64,
    segments: Vec<Segment>,
    version: Option<u64>,
    target_duration: Option<u64>,
    media_sequence: Option<u64>,
}

impl MediaBuilder {
    fn step(mut self, line: &ClassifiedLine) -> Self {
        match line.kind {
            LineKind::Tag => {
                if let Some(tag) = TagLine::parse(&line.content) {
                    self.tag(&tag, line.number);
                }
            }
            LineKind::Uri => match self.pending.take() {
                Some(mut segment) => {
                    segment.uri = line.content.clone();
                    segment.key = self.key.clone();
                    segment.map = self.map.clone();
                    self.segments.push(segment);
                }
                None => log::debug!("line {}: URI without EXTINF", line.number),
            },
            LineKind::Comment | LineKind::Empty => {}
        }
        self
    }

    fn tag(&mut self, tag: &TagLine, line_number: usize) {
        log::trace!("media tag {:?}", tag.kind);
        match tag.kind {
            TagKind::Version => {
                if let Some(version) = parse_int(tag) {
                    self.version = Some(version);
                }
            }
            TagKind::TargetDuration => {
                if let Some(duration) = parse_int(tag) {
                    self.target_duration = Some(duration);
                }
            }
            TagKind::MediaSequence => {
                if let Some(sequence) = parse_int(tag) {
                    self.media_sequence = Some(sequence);
                    self.next_sequence = sequence;
                }
            }
            TagKind::Inf => self.start_segment(tag, line_number),
            TagKind::ByteRange => match self.pending.as_mut() {
                Some(segment) => segment.byte_range = Some(tag.value_or_empty().trim().to_string()),
                None => log::debug!("line {}: EXT-X-BYTERANGE without EXTINF", line_number),
            },
            TagKind::Key => {
                let key = Key::from_attributes(&parse_attributes(tag.value_or_empty()));
                self.key = if key.disables_encryption() { None } else { Some(key) };
            }
            TagKind::Map => {
                self.map = Some(Map::from_attributes(&parse_attributes(tag.value_or_empty())));
            }
            TagKind::M3u
            | TagKind::StreamInf
            | TagKind::IFrameStreamInf
            | TagKind::Media
            | TagKind::EndList
            | TagKind::Other => {}
        }
    }

    fn start_segment(&mut self, tag: &TagLine, line_number: usize) {
        let (_, raw) = extinf_duration(tag.value_or_empty()).unwrap_or(("", ""));
        let duration = match raw.trim().parse::<f64>() {
            Ok(duration) if duration.is_finite() => duration,
            _ => {
                log::debug!("line {}: unparsable EXTINF duration {:?}", line_number, raw);
                0.0
            }
        };

        // An EXTINF that never got a URI gives its sequence number to the next one.
        let sequence = match self.pending.take() {
            Some(abandoned) => abandoned.sequence,
            None => {
                let sequence = self.next_sequence;
                self.next_sequence += 1;
                sequence
            }
        };

        self.pending = Some(Segment {
            uri: String::new(),
            duration,
            sequence,
            byte_range: None,
            key: None,
            map: None,
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classifies_master_and_media() {
        assert_eq!(
            ManifestKind::Master,
            classify("#EXT-X-STREAM-INF:BANDWIDTH=1000000\ntest.m3u8")
        );
        assert_eq!(
            ManifestKind::Master,
            classify("#EXTM3U\n#EXT-X-I-FRAME-STREAM-INF:URI=\"i.m3u8\"")
        );
        assert_eq!(ManifestKind::Media, classify("#EXTINF:10.0\nsegment.ts"));
    }

    #[test]
    fn comment_mentioning_variant_tag_is_media() {
        let text = "#EXTM3U\n# was #EXT-X-STREAM-INF once\n#EXTINF:4,\na.ts\n";
        assert_eq!(ManifestKind::Media, classify(text));
    }

    #[test]
    fn classifies_lines() {
        let lines = classify_lines("#EXTM3U\r\n# note\n\n  seg.ts  \n");
        let kinds: Vec<_> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            vec![
                LineKind::Tag,
                LineKind::Comment,
                LineKind::Empty,
                LineKind::Uri,
                LineKind::Empty
            ],
            kinds
        );
        assert_eq!("#EXTM3U", lines[0].content);
        assert_eq!("seg.ts", lines[3].content);
        assert_eq!(4, lines[3].number);
    }

    #[test]
    fn abandoned_extinf_does_not_leave_a_gap() {
        let text = "#EXTM3U\n#EXTINF:1,\n#EXTINF:2,\na.ts\n#EXTINF:3,\nb.ts\n";
        let manifest = Manifest::parse(text, "x.m3u8");
        let sequences: Vec<_> = manifest.segments().iter().map(|s| s.sequence).collect();
        assert_eq!(vec![0, 1], sequences);
        assert_eq!(2.0, manifest.segments()[0].duration);
    }

    #[test]
    fn unparsable_duration_is_zero() {
        let manifest = Manifest::parse("#EXTINF:abc,\na.ts\n#EXTINF:nan,\nb.ts", "x.m3u8");
        assert_eq!(2, manifest.segments().len());
        assert_eq!(0.0, manifest.segments()[0].duration);
        assert_eq!(0.0, manifest.segments()[1].duration);
    }
}
