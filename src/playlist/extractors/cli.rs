// CLI ManifestExtractor - uses native `yt-dlp` binary

use async_trait::async_trait;
use std::process::Command as StdCommand;
use tracing::debug;

use super::dump::{build_args, parse_stream_metadata};
use super::traits::{ExtractorConfig, ManifestExtractor};
use crate::playlist::errors::ExtractError;
use crate::playlist::models::StreamMetadata;
use crate::playlist::utils::run_output_with_timeout;

/// CLI-based extractor using the yt-dlp binary
pub struct CliManifestExtractor {
    ytdlp_path: String,
}

impl CliManifestExtractor {
    pub fn new() -> Self {
        Self {
            ytdlp_path: Self::find_ytdlp(),
        }
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: path.into(),
        }
    }

    /// Find yt-dlp binary
    fn find_ytdlp() -> String {
        // Allow override via environment variable
        if let Ok(custom) = std::env::var("YTDLP_PATH") {
            return custom;
        }

        let common_paths = [
            "/opt/homebrew/bin/yt-dlp",
            "/usr/local/bin/yt-dlp",
            "/usr/bin/yt-dlp",
        ];

        common_paths
            .iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(|path| path.to_string())
            .unwrap_or_else(|| "yt-dlp".to_string())
    }
}

impl Default for CliManifestExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestExtractor for CliManifestExtractor {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    fn is_available(&self) -> bool {
        StdCommand::new(&self.ytdlp_path)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<StreamMetadata, ExtractError> {
        let args = build_args(url, config);
        debug!(extractor = self.name(), binary = %self.ytdlp_path, %url, "Extracting");

        let output =
            run_output_with_timeout(&self.ytdlp_path, &args, config.timeout_seconds as u64).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::from(stderr.to_string()));
        }

        parse_stream_metadata(&output.stdout)
    }
}
