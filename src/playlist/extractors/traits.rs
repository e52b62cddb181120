// ManifestExtractor trait and common types

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::playlist::errors::ExtractError;
use crate::playlist::models::StreamMetadata;

/// Extraction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorMode {
    /// Python module yt_dlp
    Python,
    /// CLI binary yt-dlp
    Cli,
    /// Python first, CLI fallback
    #[default]
    Auto,
}

impl fmt::Display for ExtractorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => write!(f, "python"),
            Self::Cli => write!(f, "cli"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ExtractorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" => Ok(Self::Python),
            "cli" => Ok(Self::Cli),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown extractor mode '{}' (expected auto, python or cli)", other)),
        }
    }
}

/// Configuration for manifest extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Extraction mode (Python, CLI, or Auto)
    pub mode: ExtractorMode,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Upper bound for one yt-dlp run, in seconds
    pub timeout_seconds: u32,
    /// Ask yt-dlp to work around geographic restrictions
    pub geo_bypass: bool,
    /// Local address yt-dlp binds to (`0.0.0.0` forces IPv4)
    pub source_address: Option<String>,
    /// yt-dlp format request; the full format list is dumped regardless
    pub format: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: ExtractorMode::Auto,
            proxy: None,
            timeout_seconds: 60,
            geo_bypass: true,
            source_address: Some("0.0.0.0".to_string()),
            format: "bestvideo+bestaudio/best".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_mode(mut self, mode: ExtractorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_geo_bypass(mut self, enabled: bool) -> Self {
        self.geo_bypass = enabled;
        self
    }
}

/// Anything that can turn a watch-page locator into stream formats
#[async_trait]
pub trait ManifestExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Check if this extractor is available
    fn is_available(&self) -> bool;

    /// Fetch metadata and the full format list, without downloading media
    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<StreamMetadata, ExtractError>;
}
