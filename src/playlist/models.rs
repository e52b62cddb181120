// Common data models for playlist generation

use std::collections::HashSet;

/// One `Display Name | token` line from the links file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub name: String,
    /// Raw token as written in the links file. This is the dedupe key.
    pub token: String,
}

impl PlaylistEntry {
    /// Parse a non-comment line. Returns `None` unless there are exactly two
    /// `|`-separated fields.
    pub fn parse(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        match parts.as_slice() {
            [name, token] => Some(Self {
                name: name.to_string(),
                token: token.to_string(),
            }),
            _ => None,
        }
    }
}

/// Entry plus its normalized, redirect-resolved address
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub entry: PlaylistEntry,
    pub locator: String,
}

/// One row of yt-dlp's `formats` array
#[derive(Debug, Clone, PartialEq)]
pub struct StreamFormatCandidate {
    /// Total bitrate in kbps (`tbr`); absent for many HLS rows
    pub bitrate: Option<f64>,
    /// Protocol tag (`m3u8_native`, `https`, ...)
    pub protocol_tag: String,
    pub url: String,
}

impl StreamFormatCandidate {
    pub fn new(bitrate: Option<f64>, protocol_tag: &str, url: &str) -> Self {
        Self {
            bitrate,
            protocol_tag: protocol_tag.to_string(),
            url: url.to_string(),
        }
    }

    /// Bitrate used for ranking; missing counts as zero
    pub fn effective_bitrate(&self) -> f64 {
        self.bitrate.unwrap_or(0.0)
    }

    pub fn is_hls(&self) -> bool {
        self.protocol_tag.contains("m3u8") || self.url.contains(".m3u8")
    }
}

/// What an extractor found for a locator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamMetadata {
    pub title: String,
    pub formats: Vec<StreamFormatCandidate>,
    /// Top-level `url` yt-dlp picked for the requested format
    pub fallback_url: Option<String>,
}

/// Output counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub added: usize,
}

/// Per-run accumulator threaded through the builder
#[derive(Debug, Default)]
pub struct RunState {
    seen: HashSet<String>,
    pub stats: RunStats,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token. Returns `false` if it was already seen this run.
    pub fn admit(&mut self, token: &str) -> bool {
        if !self.seen.insert(token.to_string()) {
            return false;
        }
        self.stats.total += 1;
        true
    }

    pub fn record_added(&mut self) {
        self.stats.added += 1;
    }
}

/// What happened to a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Blank or comment line
    Ignored,
    /// Wrong number of `|` fields
    Malformed,
    /// Token already processed earlier in this run
    Duplicate,
    /// Token normalized to nothing
    Skipped,
    /// Manifest found and listed
    Added { manifest_url: String },
    /// Listed as an offline placeholder
    Offline,
}

/// Ordered, append-only playlist text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistLines {
    lines: Vec<String>,
}

impl PlaylistLines {
    /// Start a playlist with the M3U8 header
    pub fn with_header(generated_on: &str) -> Self {
        Self {
            lines: vec![
                "#EXTM3U".to_string(),
                format!("# Generated on {}", generated_on),
                "#EXT-X-VERSION:3".to_string(),
            ],
        }
    }

    pub fn push_stream(&mut self, name: &str, manifest_url: &str) {
        self.lines.push(format!("#EXTINF:-1,{}", name));
        self.lines.push("#EXT-X-PROGRAM-ID:1".to_string());
        self.lines.push(manifest_url.to_string());
    }

    pub fn push_offline(&mut self, name: &str) {
        self.lines.push(format!("#EXTINF:-1,{} (offline)", name));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Final file contents, newline-terminated
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
