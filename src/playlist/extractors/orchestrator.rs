// Extractor orchestrator - mode selection and fallback
//
// YouTube URLs go to the Python module first, anything else to the binary
// first. In auto mode the other backend is tried when the first fails.
// Each backend is probed for availability at most once per orchestrator.

use std::sync::OnceLock;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::cli::CliManifestExtractor;
use super::python::PythonManifestExtractor;
use super::traits::{ExtractorConfig, ExtractorMode, ManifestExtractor};
use crate::playlist::errors::ExtractError;
use crate::playlist::models::StreamMetadata;

/// Orchestrator that manages Python and CLI extractors
pub struct ExtractorOrchestrator {
    python: Box<dyn ManifestExtractor>,
    cli: Box<dyn ManifestExtractor>,
    python_ready: OnceLock<bool>,
    cli_ready: OnceLock<bool>,
}

impl ExtractorOrchestrator {
    pub fn new() -> Self {
        Self::with_backends(
            Box::new(PythonManifestExtractor::new()),
            Box::new(CliManifestExtractor::new()),
        )
    }

    pub fn with_backends(
        python: Box<dyn ManifestExtractor>,
        cli: Box<dyn ManifestExtractor>,
    ) -> Self {
        Self {
            python,
            cli,
            python_ready: OnceLock::new(),
            cli_ready: OnceLock::new(),
        }
    }

    fn backend(&self, mode: ExtractorMode) -> Option<&dyn ManifestExtractor> {
        match mode {
            ExtractorMode::Python => Some(self.python.as_ref()),
            ExtractorMode::Cli => Some(self.cli.as_ref()),
            ExtractorMode::Auto => None,
        }
    }

    /// Cached availability check; spawns the probe process only the first time
    fn is_ready(&self, mode: ExtractorMode) -> bool {
        let (backend, ready) = match mode {
            ExtractorMode::Python => (self.python.as_ref(), &self.python_ready),
            ExtractorMode::Cli => (self.cli.as_ref(), &self.cli_ready),
            ExtractorMode::Auto => return false,
        };
        *ready.get_or_init(|| {
            let available = backend.is_available();
            debug!(backend = backend.name(), available, "Probed backend");
            available
        })
    }

    /// Backend order for auto mode
    pub fn recommend_order(url: &str) -> [ExtractorMode; 2] {
        let lower = url.to_lowercase();
        if lower.contains("youtube.com") || lower.contains("youtu.be") {
            [ExtractorMode::Python, ExtractorMode::Cli]
        } else {
            [ExtractorMode::Cli, ExtractorMode::Python]
        }
    }

    async fn extract_single(
        &self,
        mode: ExtractorMode,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<StreamMetadata, ExtractError> {
        let backend = self
            .backend(mode)
            .ok_or_else(|| ExtractError::Unknown(format!("no backend for mode {}", mode)))?;

        if !self.is_ready(mode) {
            return Err(ExtractError::ToolNotFound(format!(
                "{} is not installed",
                backend.name()
            )));
        }

        backend.extract(url, config).await
    }

    async fn extract_auto(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<StreamMetadata, ExtractError> {
        let mut last_error = None;

        for mode in Self::recommend_order(url) {
            let Some(backend) = self.backend(mode) else {
                continue;
            };
            if !self.is_ready(mode) {
                debug!(backend = backend.name(), "Backend not available, skipping");
                continue;
            }

            match backend.extract(url, config).await {
                Ok(meta) => return Ok(meta),
                // yt-dlp's verdict on the resource will not change with the other backend
                Err(e) if e.is_definitive() => return Err(e),
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "Backend failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ExtractError::ToolNotFound(
                "Neither Python yt_dlp nor yt-dlp binary available".to_string(),
            )
        }))
    }
}

impl Default for ExtractorOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestExtractor for ExtractorOrchestrator {
    fn name(&self) -> &'static str {
        "orchestrator"
    }

    fn is_available(&self) -> bool {
        self.is_ready(ExtractorMode::Python) || self.is_ready(ExtractorMode::Cli)
    }

    async fn extract(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<StreamMetadata, ExtractError> {
        match config.mode {
            ExtractorMode::Auto => self.extract_auto(url, config).await,
            mode => self.extract_single(mode, url, config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::extractors::BlockingReason;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeBackend {
        name: &'static str,
        available: bool,
        result: Result<StreamMetadata, ExtractError>,
        calls: Arc<AtomicUsize>,
        probes: Arc<AtomicUsize>,
    }

    impl FakeBackend {
        fn boxed(
            name: &'static str,
            available: bool,
            result: Result<StreamMetadata, ExtractError>,
        ) -> (Box<dyn ManifestExtractor>, Arc<AtomicUsize>) {
            let (backend, calls, _) = Self::probed(name, available, result);
            (backend, calls)
        }

        fn probed(
            name: &'static str,
            available: bool,
            result: Result<StreamMetadata, ExtractError>,
        ) -> (Box<dyn ManifestExtractor>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let probes = Arc::new(AtomicUsize::new(0));
            let backend = Self {
                name,
                available,
                result,
                calls: calls.clone(),
                probes: probes.clone(),
            };
            (Box::new(backend), calls, probes)
        }
    }

    #[async_trait]
    impl ManifestExtractor for FakeBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.available
        }

        async fn extract(
            &self,
            _url: &str,
            _config: &ExtractorConfig,
        ) -> Result<StreamMetadata, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn meta(title: &str) -> StreamMetadata {
        StreamMetadata {
            title: title.to_string(),
            ..Default::default()
        }
    }

    const YT: &str = "https://www.youtube.com/watch?v=abc";

    #[test]
    fn test_recommend_order() {
        assert_eq!(
            ExtractorOrchestrator::recommend_order(YT),
            [ExtractorMode::Python, ExtractorMode::Cli]
        );
        assert_eq!(
            ExtractorOrchestrator::recommend_order("https://vimeo.com/1"),
            [ExtractorMode::Cli, ExtractorMode::Python]
        );
    }

    #[tokio::test]
    async fn test_auto_falls_back_on_internal_error() {
        let (python, py_calls) = FakeBackend::boxed(
            "py",
            true,
            Err(ExtractError::ExecutionError("crashed".into())),
        );
        let (cli, cli_calls) = FakeBackend::boxed("cli", true, Ok(meta("from cli")));
        let orchestrator = ExtractorOrchestrator::with_backends(python, cli);

        let result = orchestrator.extract(YT, &ExtractorConfig::default()).await.unwrap();
        assert_eq!(result.title, "from cli");
        assert_eq!(py_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cli_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_auto_stops_on_definitive_error() {
        let (python, _) = FakeBackend::boxed(
            "py",
            true,
            Err(ExtractError::Reported {
                reason: BlockingReason::NotLive,
                message: "The channel is not currently live".into(),
            }),
        );
        let (cli, cli_calls) = FakeBackend::boxed("cli", true, Ok(meta("unused")));
        let orchestrator = ExtractorOrchestrator::with_backends(python, cli);

        let err = orchestrator.extract(YT, &ExtractorConfig::default()).await.unwrap_err();
        assert_eq!(err.reason(), Some(BlockingReason::NotLive));
        assert_eq!(cli_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auto_with_nothing_installed() {
        let (python, _) = FakeBackend::boxed("py", false, Ok(meta("x")));
        let (cli, _) = FakeBackend::boxed("cli", false, Ok(meta("x")));
        let orchestrator = ExtractorOrchestrator::with_backends(python, cli);

        assert!(!orchestrator.is_available());
        let err = orchestrator.extract(YT, &ExtractorConfig::default()).await.unwrap_err();
        assert!(matches!(err, ExtractError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_forced_mode_uses_only_that_backend() {
        let (python, py_calls) = FakeBackend::boxed("py", true, Ok(meta("py")));
        let (cli, cli_calls) = FakeBackend::boxed("cli", true, Ok(meta("cli")));
        let orchestrator = ExtractorOrchestrator::with_backends(python, cli);

        let config = ExtractorConfig::default().with_mode(ExtractorMode::Cli);
        let result = orchestrator.extract(YT, &config).await.unwrap();
        assert_eq!(result.title, "cli");
        assert_eq!(py_calls.load(Ordering::SeqCst), 0);
        assert_eq!(cli_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_availability_probed_once_per_backend() {
        let (python, _, py_probes) = FakeBackend::probed("py", false, Ok(meta("py")));
        let (cli, cli_calls, cli_probes) = FakeBackend::probed("cli", true, Ok(meta("cli")));
        let orchestrator = ExtractorOrchestrator::with_backends(python, cli);
        let config = ExtractorConfig::default();

        for _ in 0..3 {
            let result = orchestrator.extract(YT, &config).await.unwrap();
            assert_eq!(result.title, "cli");
        }

        assert_eq!(py_probes.load(Ordering::SeqCst), 1);
        assert_eq!(cli_probes.load(Ordering::SeqCst), 1);
        assert_eq!(cli_calls.load(Ordering::SeqCst), 3);
    }
}
