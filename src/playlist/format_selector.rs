// ManifestSelector - picks the HLS manifest to list
//
// Candidates are the rows whose protocol or URL mentions m3u8. The highest
// bitrate wins (missing bitrate counts as 0); among equal bitrates the
// later-listed row wins.

use super::models::StreamFormatCandidate;

pub struct ManifestSelector;

impl ManifestSelector {
    /// Best HLS manifest URL, else an m3u8 fallback URL, else `None`
    pub fn select(formats: &[StreamFormatCandidate], fallback_url: Option<&str>) -> Option<String> {
        // max_by returns the last of several equal maxima
        let best = formats
            .iter()
            .filter(|f| f.is_hls())
            .max_by(|a, b| a.effective_bitrate().total_cmp(&b.effective_bitrate()));

        if let Some(best) = best {
            return Some(best.url.clone());
        }

        fallback_url
            .filter(|url| url.contains(".m3u8"))
            .map(str::to_string)
    }
}
