// Shared yt-dlp invocation and `--dump-json` parsing

use serde::Deserialize;

use super::traits::ExtractorConfig;
use crate::playlist::errors::ExtractError;
use crate::playlist::models::{StreamFormatCandidate, StreamMetadata};

#[derive(Debug, Deserialize)]
struct RawInfo {
    title: Option<String>,
    formats: Option<Vec<RawFormat>>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    tbr: Option<f64>,
    protocol: Option<String>,
    url: Option<String>,
}

/// Arguments after the program (and `-m yt_dlp` for Python)
pub fn build_args(url: &str, config: &ExtractorConfig) -> Vec<String> {
    let mut args = vec![
        "--dump-json".to_string(),
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        "--skip-download".to_string(),
        "--socket-timeout".to_string(),
        config.timeout_seconds.to_string(),
        "-f".to_string(),
        config.format.clone(),
    ];

    if config.geo_bypass {
        args.push("--geo-bypass".to_string());
    }

    if let Some(addr) = &config.source_address {
        args.push("--source-address".to_string());
        args.push(addr.clone());
    }

    if let Some(proxy) = &config.proxy {
        args.push("--proxy".to_string());
        args.push(proxy.clone());
    }

    args.push(url.to_string());
    args
}

/// Parse `--dump-json` stdout into stream metadata
pub fn parse_stream_metadata(stdout: &[u8]) -> Result<StreamMetadata, ExtractError> {
    let raw: RawInfo = serde_json::from_slice(stdout)
        .map_err(|e| ExtractError::ParseError(format!("Invalid JSON: {}", e)))?;

    // Rows without a usable url cannot be listed
    let formats = raw
        .formats
        .unwrap_or_default()
        .into_iter()
        .filter_map(|f| {
            f.url.filter(|u| !u.is_empty()).map(|url| StreamFormatCandidate {
                bitrate: f.tbr,
                protocol_tag: f.protocol.unwrap_or_default(),
                url,
            })
        })
        .collect();

    Ok(StreamMetadata {
        title: raw.title.unwrap_or_else(|| "Unknown".to_string()),
        formats,
        fallback_url: raw.url,
    })
}
