use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use yt_live_playlist::playlist::{
    generate_playlist, ExtractorConfig, ExtractorMode, ExtractorOrchestrator,
    HttpRedirectResolver, PlaylistBuilder, DEFAULT_REDIRECT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(
    name = "yt-live-playlist",
    about = "YouTube HLS playlist generator (yt-dlp + redirect resolver)",
    version
)]
struct Args {
    /// Links file, one `Display Name | token` per line
    #[arg(short, long, default_value = "links.txt")]
    input: PathBuf,

    /// Playlist to write
    #[arg(short, long, default_value = "playlist.m3u8")]
    output: PathBuf,

    /// yt-dlp backend: auto, python or cli
    #[arg(long, default_value = "auto")]
    mode: ExtractorMode,

    /// Proxy URL (supports http, https, socks5)
    #[arg(long, env = "YT_PLAYLIST_PROXY")]
    proxy: Option<String>,

    /// Timeout for resolving `/live` redirects, in seconds
    #[arg(long, default_value_t = DEFAULT_REDIRECT_TIMEOUT_SECS)]
    redirect_timeout: u64,

    /// Timeout for one yt-dlp run, in seconds
    #[arg(long, default_value_t = 60)]
    extract_timeout: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    info!("YouTube HLS Playlist Generator (yt-dlp + redirect resolver)");

    let config = ExtractorConfig::default()
        .with_mode(args.mode)
        .with_proxy(args.proxy.clone())
        .with_timeout(args.extract_timeout);
    let resolver = HttpRedirectResolver::new(args.proxy.as_deref(), args.redirect_timeout);
    let builder = PlaylistBuilder::new(
        Box::new(ExtractorOrchestrator::new()),
        Box::new(resolver),
        config,
    );

    if let Err(e) = generate_playlist(&args.input, &args.output, &builder).await {
        error!("{}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
