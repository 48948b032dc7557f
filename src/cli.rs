use std::net::SocketAddr;
use std::path::PathBuf;

use artist_explorer::clients::{deezer::DEFAULT_BASE_URL, errors::Result};
use artist_explorer::config::ConfigBuilder;
use artist_explorer::server;
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[command(name = "artist-explorer")]
#[command(version, about = "Search Deezer artists and keep a list of favorites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, env = "ARTIST_EXPLORER_BIND", default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        /// Favorites database file, defaults to the platform data directory
        #[arg(long, env = "ARTIST_EXPLORER_DB")]
        db_path: Option<PathBuf>,

        /// Deezer API base URL
        #[arg(long, env = "DEEZER_BASE_URL", default_value = DEFAULT_BASE_URL)]
        upstream_url: String,

        /// Allowed CORS origin, may be repeated
        #[arg(long = "cors-origin", env = "ARTIST_EXPLORER_CORS_ORIGINS", value_delimiter = ',')]
        cors_origins: Vec<String>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            db_path,
            upstream_url,
            cors_origins,
        } => {
            info!("Building config ...");
            let mut builder = ConfigBuilder::new().deezer_base_url(upstream_url);
            if let Some(path) = db_path {
                builder = builder.db_path(path);
            }
            if !cors_origins.is_empty() {
                builder = builder.cors_origins(cors_origins);
            }
            let config = builder.build().await?;
            server::serve(config, bind).await
        }
    }
}
