// PlaylistBuilder - turns links-file lines into M3U8 playlist lines
//
// Entries are processed strictly in input order, one at a time, so the
// output order always matches the links file. Every per-entry failure ends
// as an offline placeholder; nothing here aborts a run.

use std::path::Path;

use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::errors::PlaylistError;
use super::extractors::{ExtractorConfig, ManifestExtractor};
use super::format_selector::ManifestSelector;
use super::models::{
    EntryOutcome, PlaylistEntry, PlaylistLines, ResolvedSource, RunState, RunStats,
};
use super::normalize::normalize_token;
use super::resolver::RedirectResolver;

/// Result of one build
#[derive(Debug, Clone)]
pub struct PlaylistBuild {
    pub lines: PlaylistLines,
    pub stats: RunStats,
    /// One outcome per input line, in input order
    pub outcomes: Vec<EntryOutcome>,
}

pub struct PlaylistBuilder {
    extractor: Box<dyn ManifestExtractor>,
    resolver: Box<dyn RedirectResolver>,
    config: ExtractorConfig,
}

impl PlaylistBuilder {
    pub fn new(
        extractor: Box<dyn ManifestExtractor>,
        resolver: Box<dyn RedirectResolver>,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            extractor,
            resolver,
            config,
        }
    }

    /// Build a playlist stamped with the current UTC time
    pub async fn build<I, S>(&self, lines: I) -> Result<PlaylistBuild, PlaylistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build_at(lines, OffsetDateTime::now_utc()).await
    }

    /// Build a playlist stamped with `generated_at`
    pub async fn build_at<I, S>(
        &self,
        lines: I,
        generated_at: OffsetDateTime,
    ) -> Result<PlaylistBuild, PlaylistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut playlist = PlaylistLines::with_header(&format_timestamp(generated_at)?);
        let mut state = RunState::new();
        let mut outcomes = Vec::new();

        for line in lines {
            let outcome = self
                .process_line(line.as_ref(), &mut state, &mut playlist)
                .await;
            outcomes.push(outcome);
        }

        Ok(PlaylistBuild {
            lines: playlist,
            stats: state.stats,
            outcomes,
        })
    }

    async fn process_line(
        &self,
        line: &str,
        state: &mut RunState,
        playlist: &mut PlaylistLines,
    ) -> EntryOutcome {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') {
            return EntryOutcome::Ignored;
        }

        let Some(entry) = PlaylistEntry::parse(raw) else {
            warn!(line = %raw, "Skipping malformed line");
            return EntryOutcome::Malformed;
        };

        // Empty tokens never reach the counters
        let Some(url) = normalize_token(&entry.token) else {
            return EntryOutcome::Skipped;
        };

        if !state.admit(&entry.token) {
            return EntryOutcome::Duplicate;
        }

        let locator = self.resolver.resolve(&url).await;
        let source = ResolvedSource { entry, locator };

        info!(name = %source.entry.name, url = %source.locator, "Processing");

        match self.find_manifest(&source).await {
            Some(manifest_url) => {
                playlist.push_stream(&source.entry.name, &manifest_url);
                state.record_added();
                info!(name = %source.entry.name, "Added HLS");
                EntryOutcome::Added { manifest_url }
            }
            None => {
                playlist.push_offline(&source.entry.name);
                info!(name = %source.entry.name, "No HLS (not live or restricted)");
                EntryOutcome::Offline
            }
        }
    }

    async fn find_manifest(&self, source: &ResolvedSource) -> Option<String> {
        let meta = match self.extractor.extract(&source.locator, &self.config).await {
            Ok(meta) => meta,
            Err(e) if e.is_definitive() => {
                let retry_later = e.reason().is_some_and(|r| r.is_transient());
                warn!(url = %source.locator, error = %e, retry_later, "yt-dlp could not extract");
                return None;
            }
            Err(e) => {
                warn!(url = %source.locator, error = %e, "Unexpected extraction error");
                return None;
            }
        };

        debug!(url = %source.locator, title = %meta.title, formats = meta.formats.len(), "Extracted info");
        ManifestSelector::select(&meta.formats, meta.fallback_url.as_deref())
    }
}

fn format_timestamp(at: OffsetDateTime) -> Result<String, PlaylistError> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    at.format(&format)
        .map_err(|e| PlaylistError::Timestamp(e.to_string()))
}

/// Read `input`, build the playlist and write it to `output`.
///
/// A missing input file is fatal and leaves `output` untouched.
pub async fn generate_playlist(
    input: &Path,
    output: &Path,
    builder: &PlaylistBuilder,
) -> Result<RunStats, PlaylistError> {
    if !tokio::fs::try_exists(input).await.unwrap_or(false) {
        return Err(PlaylistError::InputMissing(input.to_path_buf()));
    }

    let content = tokio::fs::read_to_string(input)
        .await
        .map_err(|source| PlaylistError::Io {
            path: input.to_path_buf(),
            source,
        })?;

    let build = builder.build(content.lines()).await?;

    tokio::fs::write(output, build.lines.render())
        .await
        .map_err(|source| PlaylistError::Io {
            path: output.to_path_buf(),
            source,
        })?;

    info!(
        added = build.stats.added,
        total = build.stats.total,
        output = %output.display(),
        "{}/{} entries produced HLS",
        build.stats.added,
        build.stats.total
    );

    Ok(build.stats)
}
