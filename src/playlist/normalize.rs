// Token -> watch/live URL

const YOUTUBE_BASE: &str = "https://www.youtube.com";

/// Turn a links-file token into a URL.
///
/// - `@handle` becomes the channel's `/live` alias
/// - `http://` and `https://` URLs pass through
/// - anything else is treated as a video id
///
/// Returns `None` for an empty token.
pub fn normalize_token(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if token.starts_with('@') {
        return Some(format!("{}/{}/live", YOUTUBE_BASE, token));
    }

    if token.starts_with("http://") || token.starts_with("https://") {
        return Some(token.to_string());
    }

    Some(format!("{}/watch?v={}", YOUTUBE_BASE, token))
}
