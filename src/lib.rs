pub mod playlist;

pub use playlist::{generate_playlist, PlaylistBuilder, PlaylistError, RunStats};
