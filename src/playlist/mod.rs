// Playlist module - live HLS playlist generation pipeline
//
// links file -> normalize -> resolve redirects -> extract -> select -> M3U8

pub mod builder;
pub mod errors;
pub mod extractors;
pub mod format_selector;
pub mod models;
pub mod normalize;
pub mod resolver;
pub mod utils;

pub use builder::{generate_playlist, PlaylistBuild, PlaylistBuilder};
pub use errors::{ExtractError, PlaylistError};
pub use extractors::{ExtractorConfig, ExtractorMode, ExtractorOrchestrator, ManifestExtractor};
pub use format_selector::ManifestSelector;
pub use models::{EntryOutcome, PlaylistEntry, PlaylistLines, RunStats, StreamFormatCandidate, StreamMetadata};
pub use normalize::normalize_token;
pub use resolver::{HttpRedirectResolver, RedirectResolver, DEFAULT_REDIRECT_TIMEOUT_SECS};
