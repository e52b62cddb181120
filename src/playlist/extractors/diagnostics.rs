// Blocking diagnostics - classifies why yt-dlp produced no live stream
//
// yt-dlp reports most per-video verdicts as a single `ERROR:` line on stderr.
// The classification only feeds logging; every reason leads to the same
// offline placeholder in the playlist.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ERROR: [youtube] abc123: This live event will begin in 3 hours.
    static ref ERROR_LINE_RE: Regex =
        Regex::new(r"(?m)^ERROR:\s*(?:\[[^\]]+\]\s*)?(?:[@\w-]+:\s+)?(.+?)\s*$").unwrap();
}

/// Reasons why a resource has no extractable live stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingReason {
    /// Channel is not broadcasting, or the event has not started yet
    NotLive,

    /// Geographic restriction that geo bypass could not lift
    GeoBlocked,

    /// Video deleted or unavailable
    VideoUnavailable,

    /// Private video requiring authorization
    PrivateVideo,

    /// Age-restricted content requiring login
    AgeRestricted,

    /// Member-only content (requires channel membership)
    MembersOnly,

    /// DRM-protected or paid content
    DrmProtected,

    /// Rate limiting (429 or similar)
    RateLimited,

    /// Bot detection triggered
    BotDetection,

    /// HTTP 403 Forbidden - general access denied
    Http403Forbidden,

    /// Network timeout inside yt-dlp
    NetworkTimeout,

    /// yt-dlp reported an error we do not recognise
    Unknown,
}

impl BlockingReason {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotLive => "Not currently live",
            Self::GeoBlocked => "Geographic restriction",
            Self::VideoUnavailable => "Video unavailable",
            Self::PrivateVideo => "Private video",
            Self::AgeRestricted => "Age-restricted content",
            Self::MembersOnly => "Members-only content",
            Self::DrmProtected => "DRM-protected content",
            Self::RateLimited => "Rate limited by YouTube",
            Self::BotDetection => "Bot detection triggered",
            Self::Http403Forbidden => "Access denied (HTTP 403)",
            Self::NetworkTimeout => "Network timeout",
            Self::Unknown => "Extraction failed",
        }
    }

    /// Whether running again later could plausibly yield a stream
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NotLive
                | Self::RateLimited
                | Self::BotDetection
                | Self::Http403Forbidden
                | Self::NetworkTimeout
        )
    }
}

/// First `ERROR:` message in yt-dlp stderr, without the extractor/id prefix
pub fn error_summary(stderr: &str) -> Option<String> {
    ERROR_LINE_RE
        .captures(stderr)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Analyze error message and return blocking reason
pub fn diagnose_error(error: &str) -> Option<BlockingReason> {
    if error.trim().is_empty() {
        return None;
    }

    let lower = error.to_lowercase();

    // Offline channels and scheduled streams are the common case
    if lower.contains("not currently live")
        || lower.contains("live event will begin")
        || lower.contains("premieres in")
        || lower.contains("live stream recording is not available")
        || lower.contains("waiting for scheduled stream")
    {
        return Some(BlockingReason::NotLive);
    }

    if lower.contains("drm")
        || lower.contains("widevine")
        || lower.contains("requires purchase")
        || lower.contains("rental")
        || lower.contains("requires payment")
    {
        return Some(BlockingReason::DrmProtected);
    }

    if lower.contains("members only")
        || lower.contains("members-only")
        || lower.contains("join this channel")
        || lower.contains("available to members")
    {
        return Some(BlockingReason::MembersOnly);
    }

    if lower.contains("age-restricted")
        || lower.contains("sign in to confirm your age")
        || lower.contains("age_verification")
    {
        return Some(BlockingReason::AgeRestricted);
    }

    if lower.contains("private video") || lower.contains("video is private") {
        return Some(BlockingReason::PrivateVideo);
    }

    if lower.contains("not available in your country")
        || lower.contains("blocked in your country")
        || lower.contains("geo restrict")
        || lower.contains("geo-restrict")
    {
        return Some(BlockingReason::GeoBlocked);
    }

    if lower.contains("video unavailable")
        || lower.contains("video has been removed")
        || lower.contains("no longer available")
        || lower.contains("video is unavailable")
        || lower.contains("does not exist")
    {
        return Some(BlockingReason::VideoUnavailable);
    }

    if lower.contains("429") || lower.contains("rate limit") || lower.contains("too many requests") {
        return Some(BlockingReason::RateLimited);
    }

    if lower.contains("confirm you're not a bot")
        || lower.contains("captcha")
        || lower.contains("unusual traffic")
    {
        return Some(BlockingReason::BotDetection);
    }

    if lower.contains("403") || lower.contains("forbidden") {
        return Some(BlockingReason::Http403Forbidden);
    }

    if lower.contains("timed out") || lower.contains("timeout") || lower.contains("connection refused")
    {
        return Some(BlockingReason::NetworkTimeout);
    }

    Some(BlockingReason::Unknown)
}
