use hls::{is_http, Manifest, Resolver, Segment};
use std::fmt::Write;
use url::Url;

pub fn format_bandwidth(bandwidth: u64) -> String {
    if bandwidth >= 1_000_000 {
        format!("{:.1} Mbps", bandwidth as f64 / 1_000_000.0)
    } else if bandwidth >= 1_000 {
        format!("{:.1} Kbps", bandwidth as f64 / 1_000.0)
    } else {
        format!("{} bps", bandwidth)
    }
}

/// `H:MM:SS`, or `M:SS` under an hour.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds as u64;
    let (hours, minutes, secs) = (total / 3600, (total / 60) % 60, total % 60);

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

pub fn summary(manifest: &Manifest) -> String {
    if manifest.is_master() {
        master_summary(manifest)
    } else {
        media_summary(manifest)
    }
}

fn master_summary(manifest: &Manifest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Master Manifest - {}", manifest.source());
    let _ = writeln!(out);
    let _ = writeln!(out, "Version: {}", manifest.version());
    let _ = writeln!(out, "Variants: {}", manifest.variants().len());

    for (i, variant) in manifest.variants().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:>10}  {:<10} {:<24} {}",
            i + 1,
            format_bandwidth(variant.bandwidth),
            variant.resolution.as_deref().unwrap_or("-"),
            variant.codecs.as_deref().unwrap_or("-"),
            variant.uri
        );
    }

    let _ = writeln!(out);
    let _ = write!(out, "Base URL: {}", manifest.base_ref());
    out
}

fn media_summary(manifest: &Manifest) -> String {
    let target_duration = manifest
        .target_duration()
        .map_or_else(|| "-".to_string(), |d| format!("{} seconds", d));

    let mut out = String::new();
    let _ = writeln!(out, "Media Manifest - {}", manifest.source());
    let _ = writeln!(out);
    let _ = writeln!(out, "Version: {}", manifest.version());
    let _ = writeln!(out, "Target Duration: {}", target_duration);
    let _ = writeln!(out, "Media Sequence: {}", manifest.media_sequence().unwrap_or(0));
    let _ = writeln!(out, "Total Segments: {}", manifest.segments().len());
    let _ = writeln!(out, "Total Duration: {}", format_duration(manifest.total_duration()));
    let _ = writeln!(out, "Encrypted Segments: {}", manifest.encrypted_segments());
    let _ = writeln!(out);
    let _ = write!(out, "Base URL: {}", manifest.base_ref());
    out
}

/// One row per navigable line: line number, raw target, resolved target.
pub fn navigable_listing(manifest: &Manifest) -> String {
    let resolver = manifest.resolver();
    manifest
        .navigable_items()
        .iter()
        .map(|(line, target)| format!("{:>5}  {}  ->  {}", line, target, resolver.resolve(target)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_iv(iv: &str) -> String {
    let digits = iv.trim_start_matches("0x").trim_start_matches("0X");
    match hex::decode(digits) {
        Ok(bytes) => format!("{} ({} bytes)", iv, bytes.len()),
        Err(_) => format!("{} (not hex)", iv),
    }
}

pub fn segment_details(segment: &Segment, resolver: &Resolver) -> String {
    let resolved = resolver.resolve(&segment.uri);

    let mut out = String::new();
    let _ = writeln!(out, "URI: {}", segment.uri);
    let _ = writeln!(out, "Resolved: {}", resolved);
    let _ = writeln!(out);
    let _ = writeln!(out, "Duration: {:.3} seconds", segment.duration);
    let _ = write!(out, "Sequence: {}", segment.sequence);

    if let Some(range) = &segment.byte_range {
        let _ = write!(out, "\nByte Range: {}", range);
    }
    if let Some(key) = &segment.key {
        let _ = write!(out, "\nEncryption: {}", key.method);
        if let Some(uri) = &key.uri {
            let _ = write!(out, " (Key URI: {})", uri);
        }
        if let Some(iv) = &key.iv {
            let _ = write!(out, "\nIV: {}", describe_iv(iv));
        }
    }
    if let Some(map) = &segment.map {
        let _ = write!(out, "\nInit Fragment: {}", map.uri);
        if let Some(range) = &map.byte_range {
            let _ = write!(out, " (Range: {})", range);
        }
    }

    let _ = write!(out, "\n\n{}", url_components(&resolved));
    out
}

pub fn url_components(resolved: &str) -> String {
    if !is_http(resolved) {
        return format!("Local file path: {}", resolved);
    }

    match Url::parse(resolved) {
        Ok(url) => format!(
            "Scheme: {}\nHost: {}\nPath: {}\nQuery: {}\nFragment: {}",
            url.scheme(),
            url.host_str().unwrap_or_default(),
            url.path(),
            url.query().unwrap_or_default(),
            url.fragment().unwrap_or_default()
        ),
        Err(_) => format!("Invalid URL: {}", resolved),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_bandwidth() {
        assert_eq!("7.7 Mbps", format_bandwidth(7_680_000));
        assert_eq!("1.0 Mbps", format_bandwidth(1_000_000));
        assert_eq!("86.0 Kbps", format_bandwidth(86_000));
        assert_eq!("999 bps", format_bandwidth(999));
        assert_eq!("0 bps", format_bandwidth(0));
    }

    #[test]
    fn formats_duration() {
        assert_eq!("0:27", format_duration(27.027));
        assert_eq!("10:00", format_duration(600.0));
        assert_eq!("1:01:05", format_duration(3665.9));
        assert_eq!("0:00", format_duration(0.0));
    }

    #[test]
    fn media_summary_counts() {
        let text = "#EXT-X-TARGETDURATION:10\n#EXT-X-MEDIA-SEQUENCE:7\n\
                    #EXTINF:9.5,\na.ts\n\
                    #EXT-X-KEY:METHOD=AES-128,URI=\"k\"\n#EXTINF:9.5,\nb.ts\n";
        let out = summary(&Manifest::parse(text, "/hls/index.m3u8"));

        assert!(out.starts_with("Media Manifest - /hls/index.m3u8"));
        assert!(out.contains("Target Duration: 10 seconds"));
        assert!(out.contains("Media Sequence: 7"));
        assert!(out.contains("Total Segments: 2"));
        assert!(out.contains("Total Duration: 0:19"));
        assert!(out.contains("Encrypted Segments: 1"));
        assert!(out.ends_with("Base URL: /hls"));
    }

    #[test]
    fn master_summary_lists_variants() {
        let text = "#EXT-X-STREAM-INF:BANDWIDTH=2560000,RESOLUTION=1280x720\nmid.m3u8\n";
        let out = summary(&Manifest::parse(text, "https://e.com/m.m3u8"));

        assert!(out.contains("Variants: 1"));
        assert!(out.contains("2.6 Mbps"));
        assert!(out.contains("1280x720"));
        assert!(out.contains("mid.m3u8"));
        assert!(out.ends_with("Base URL: https://e.com/"));
    }

    #[test]
    fn lists_resolved_items() {
        let text = "#EXTINF:4,\nseg.ts\n";
        let out = navigable_listing(&Manifest::parse(text, "https://cdn.example.com/a/i.m3u8"));
        assert_eq!("    2  seg.ts  ->  https://cdn.example.com/a/seg.ts", out);
    }

    #[test]
    fn segment_details_with_key_and_map() {
        let text = "#EXT-X-MAP:URI=\"init.mp4\",BYTERANGE=\"720@0\"\n\
                    #EXT-X-KEY:METHOD=AES-128,URI=\"key.bin\",IV=0x00000000000000000000000000000001\n\
                    #EXTINF:2.002,\n#EXT-X-BYTERANGE:1000@720\nmedia.mp4?sig=1\n";
        let manifest = Manifest::parse(text, "https://cdn.example.com/v/index.m3u8");
        let out = segment_details(&manifest.segments()[0], &manifest.resolver());

        assert!(out.contains("Resolved: https://cdn.example.com/v/media.mp4?sig=1"));
        assert!(out.contains("Duration: 2.002 seconds"));
        assert!(out.contains("Byte Range: 1000@720"));
        assert!(out.contains("Encryption: AES-128 (Key URI: key.bin)"));
        assert!(out.contains("(16 bytes)"));
        assert!(out.contains("Init Fragment: init.mp4 (Range: 720@0)"));
        assert!(out.contains("Host: cdn.example.com"));
        assert!(out.contains("Query: sig=1"));
    }

    #[test]
    fn local_segments_have_no_url_parts() {
        assert_eq!("Local file path: /hls/a.ts", url_components("/hls/a.ts"));
    }
}
