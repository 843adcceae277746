//! Glyphdex RPC Server - HTTP autocomplete backend.
//!
//! This binary serves the icon, wrapper-class, wrapper-style and CDN URI
//! autocomplete endpoints over HTTP, wrapping the glyphdex-core library
//! for form frontends that talk JSON.

mod handler;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use glyphdex_core::{Glyphdex, MemoryCache, Settings};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "glyphdex-rpc")]
#[command(about = "Autocomplete HTTP server for Glyphdex")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "0")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Settings file (a missing file means defaults)
    #[arg(long, default_value = "glyphdex.yml")]
    settings: PathBuf,

    /// Directory that anchors relative self-hosted paths
    #[arg(long, default_value = ".")]
    app_root: String,

    /// SQLite cache database (defaults to the user cache directory)
    #[arg(long)]
    cache_db: Option<PathBuf>,

    /// Keep the metadata cache in memory only
    #[arg(long)]
    no_cache: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting Glyphdex RPC Server");
    info!("Settings file: {}", args.settings.display());

    let dex = if args.no_cache {
        let settings = Settings::load(&args.settings)?;
        Glyphdex::new(
            settings,
            args.app_root.clone(),
            Some(Arc::new(MemoryCache::new())),
        )
    } else {
        let cache_db = args.cache_db.clone().unwrap_or_else(default_cache_db);
        info!("Cache database: {}", cache_db.display());
        Glyphdex::open(&args.settings, args.app_root.clone(), Some(&cache_db))?
    };

    // Start the server
    let addr = server::start_server(dex, &args.host, args.port).await?;

    // Print port for the supervising process to read (intentional stdout)
    println!("RPC_PORT={}", addr.port());

    info!("RPC server running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}

fn default_cache_db() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("glyphdex")
        .join("cache.sqlite3")
}
