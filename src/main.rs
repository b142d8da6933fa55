//! Colorful Streets map server.
//!
//! Serves an OpenLayers page showing an OSM street extract, every street
//! stroked in a color chosen by the first rule matching its name.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │              COLORFUL STREETS                 │
//!     Browser            │  ┌─────────┐    ┌──────────┐    ┌──────────┐ │
//!     (OpenLayers) ──────┼─▶│  http   │───▶│   map    │───▶│ classify │ │
//!       GET /            │  │ server  │    │  page +  │    │  rules   │ │
//!       GET /data/*.osm  │  └─────────┘    │  styles  │    └──────────┘ │
//!       POST styles      │       ▲         └──────────┘                 │
//!                        │       │ ArcSwap<MapState>                    │
//!                        │  ┌─────────┐  ┌──────────────┐ ┌───────────┐ │
//!                        │  │ config  │  │observability │ │ lifecycle │ │
//!                        │  │+watcher │  │logs + metrics│ │ signals   │ │
//!                        │  └─────────┘  └──────────────┘ └───────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use colorful_streets::lifecycle::startup::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "colorful-streets")]
#[command(about = "Serve a map with streets colored by their names", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override vectors.data_file
    #[arg(short, long)]
    data_file: Option<String>,

    /// Do not reload the configuration file when it changes
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    startup::run(StartupOptions {
        config_path: args.config,
        bind_address: args.bind,
        data_file: args.data_file,
        watch: !args.no_watch,
    })
    .await?;

    Ok(())
}
