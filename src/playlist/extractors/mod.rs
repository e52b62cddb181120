// Manifest extraction backends
//
// Two ways of running yt-dlp:
// - Python mode: `python3 -m yt_dlp`
// - CLI mode: native `yt-dlp` binary
//
// The orchestrator picks between them per URL and falls back on failure.

mod cli;
mod diagnostics;
mod dump;
mod orchestrator;
mod python;
mod traits;

pub use cli::CliManifestExtractor;
pub use diagnostics::{diagnose_error, error_summary, BlockingReason};
pub use orchestrator::ExtractorOrchestrator;
pub use python::PythonManifestExtractor;
pub use traits::{ExtractorConfig, ExtractorMode, ManifestExtractor};
