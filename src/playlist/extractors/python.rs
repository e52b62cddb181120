// Python ManifestExtractor - uses `python3 -m yt_dlp`
//
// Preferred for YouTube: the module tracks upstream fixes faster than
// packaged binaries, which matters for live pages.

use async_trait::async_trait;
use std::process::Command as StdCommand;
use tracing::debug;

use super::dump::{build_args, parse_stream_metadata};
use super::traits::{ExtractorConfig, ManifestExtractor};
use crate::playlist::errors::ExtractError;
use crate::playlist::models::StreamMetadata;
use crate::playlist::utils::run_output_with_timeout;

/// Python-based extractor using the yt_dlp module
pub struct PythonManifestExtractor {
    python_cmd: String,
}

impl PythonManifestExtractor {
    pub fn new() -> Self {
        Self {
            python_cmd: Self::find_python(),
        }
    }

    pub fn with_interpreter(cmd: impl Into<String>) -> Self {
        Self {
            python_cmd: cmd.into(),
        }
    }

    /// Find Python interpreter
    fn find_python() -> String {
        // e.g. a venv interpreter, to sidestep PEP 668 system installs
        if let Ok(custom) = std::env::var("YTDLP_PYTHON") {
            return custom;
        }

        let candidates = ["python3", "/opt/homebrew/bin/python3", "/usr/local/bin/python3"];

        candidates
            .iter()
            .find(|cmd| {
                StdCommand::new(cmd)
                    .arg("--version")
                    .output()
                    .map(|out| out.status.success())
                    .unwrap_or(false)
            })
            .map(|cmd| cmd.to_string())
            .unwrap_or_else(|| "python3".to_string())
    }
}

impl Default for PythonManifestExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestExtractor for PythonManifestExtractor {
    fn name(&self) -> &'static str {
        "python-yt-dlp"
    }

    fn is_available(&self) -> bool {
        StdCommand::new(&self.python_cmd)
            .args(["-c", "import yt_dlp"])
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<StreamMetadata, ExtractError> {
        let mut args = vec!["-m".to_string(), "yt_dlp".to_string()];
        args.extend(build_args(url, config));
        debug!(extractor = self.name(), python = %self.python_cmd, %url, "Extracting");

        let output =
            run_output_with_timeout(&self.python_cmd, &args, config.timeout_seconds as u64).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::from(stderr.to_string()));
        }

        parse_stream_metadata(&output.stdout)
    }
}
