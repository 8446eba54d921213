use clap::Parser;
use picquick::config::{GalleryConfig, LayoutMode};
use picquick::imaging::Thumbnailer;
use picquick::watch::{GalleryWatcher, ThumbnailOnCreated};
use picquick::{scan, server};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "picquick")]
#[command(about = "Browsable image gallery server with automatic thumbnails")]
#[command(long_about = "\
Browsable image gallery server with automatic thumbnails

Point picquick at a directory of image folders. On startup it generates a
downscaled JPEG thumbnail for every image that doesn't have one, then keeps
watching the directory and thumbnails new images as they appear, while
serving the gallery over HTTP.

Directory structure:

  photos/                  # --image-root
  ├── thumbs/              # generated thumbnails (never scanned)
  │   └── vacation/
  │       └── beach.jpg
  └── vacation/            # each folder becomes a gallery page
      ├── beach.png
      └── dunes.jpg

Routes:

  /                        # index of gallery folders
  /gallery/<folder>        # thumbnail grid for one folder
  /thumbs/<path>           # thumbnail files
  /<path>                  # original files")]
#[command(version)]
struct Cli {
    /// Directory containing the original images
    #[arg(long, default_value = ".")]
    image_root: PathBuf,

    /// Thumbnail height in pixels
    #[arg(long, default_value_t = 400)]
    target_dimension: u32,

    /// Thumbnail directory layout
    #[arg(long, value_enum, default_value = "mirrored")]
    layout: LayoutMode,

    /// Only scan and watch the top level of the image root
    #[arg(long)]
    no_recursive: bool,

    /// Also treat .gif files as images
    #[arg(long)]
    gif: bool,

    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("picquick=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = GalleryConfig::new(&cli.image_root)?;
    config.target_dimension = cli.target_dimension;
    config.layout = cli.layout;
    config.recursive = !cli.no_recursive;
    if cli.gif {
        config = config.with_gif();
    }
    let config = Arc::new(config);

    // Startup pass fills in missing thumbnails before the server comes up.
    let report = scan::scan(&config, &Thumbnailer::new(Arc::clone(&config)))?;
    info!("initial scan: {report}");

    // The watcher takes over from here; its subscription is released on
    // shutdown below.
    let mut watcher = GalleryWatcher::new(&config);
    watcher.start(ThumbnailOnCreated::new(
        Arc::clone(&config),
        Thumbnailer::new(Arc::clone(&config)),
    ))?;

    server::serve(Arc::clone(&config), cli.bind).await?;

    watcher.stop();
    Ok(())
}
