use hls::Manifest;

#[derive(Debug, PartialEq)]
pub enum FileAdd {
    Segment { sequence: u64, uri: String },
    Key(String),
}

/// Reports segments and key URIs a live playlist gains between refreshes.
pub struct ManifestWatcher<F>
where
    F: FnMut(FileAdd),
{
    first_sequence: Option<u64>,
    last_sequence: Option<u64>,
    last_key: Option<String>,
    data_added: F,
}

impl<F> ManifestWatcher<F>
where
    F: FnMut(FileAdd),
{
    pub fn new(data_added: F) -> Self {
        Self {
            first_sequence: None,
            last_sequence: None,
            last_key: None,
            data_added,
        }
    }

    /// Only segments beyond the highest sequence seen so far are reported, so
    /// segments that slide out of the window are never reported twice.
    ///
    /// A window that starts below the previous one means the stream restarted
    /// its numbering; everything in it is then reported as new.
    pub fn update(&mut self, manifest: &Manifest) {
        if let Some(first) = manifest.segments().first() {
            if self.first_sequence.map_or(false, |prev| first.sequence < prev) {
                log::info!(
                    "media sequence restarted at {} (was {:?})",
                    first.sequence,
                    self.first_sequence
                );
                self.last_sequence = None;
            }
            self.first_sequence = Some(first.sequence);
        }

        for segment in manifest.segments() {
            if self.last_sequence.map_or(false, |last| segment.sequence <= last) {
                continue;
            }

            let key_uri = segment.key.as_ref().and_then(|key| key.uri.clone());
            if key_uri.is_some() && key_uri != self.last_key {
                self.last_key = key_uri.clone();
                (self.data_added)(FileAdd::Key(key_uri.unwrap_or_default()));
            }

            self.last_sequence = Some(segment.sequence);
            (self.data_added)(FileAdd::Segment {
                sequence: segment.sequence,
                uri: segment.uri.clone(),
            });
        }
    }

    /// Records `manifest`'s segments and key as already seen without reporting them.
    pub fn mark_seen(&mut self, manifest: &Manifest) {
        self.first_sequence = manifest.segments().first().map(|s| s.sequence);
        if let Some(last) = manifest.segments().last() {
            self.last_sequence = Some(last.sequence);
            self.last_key = last.key.as_ref().and_then(|key| key.uri.clone());
        }
    }

    pub fn last_sequence(&self) -> Option<u64> {
        self.last_sequence
    }
}
