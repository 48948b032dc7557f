use std::path::PathBuf;
use std::sync::Arc;

use crate::clients::{DeezerClient, LocalStorage, errors::Result};

/// Origins the bundled web frontend is served from during development
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Clients and settings the HTTP server is built from
pub struct Config {
    /// Upstream proxy client
    pub deezer: Arc<DeezerClient>,
    /// Favorites store, opened once and shared
    pub storage: Arc<LocalStorage>,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
}

/// Assembles a [`Config`], filling in defaults for anything not set
#[derive(Default)]
pub struct ConfigBuilder {
    deezer: Option<DeezerClient>,
    deezer_base_url: Option<String>,
    storage: Option<LocalStorage>,
    db_path: Option<PathBuf>,
    cors_origins: Option<Vec<String>>,
}

impl ConfigBuilder {
    /// Empty builder, every part falls back to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already built Deezer client
    #[must_use]
    pub fn deezer(mut self, deezer: DeezerClient) -> Self {
        self.deezer = Some(deezer);
        self
    }

    /// Point the Deezer client at another base URL
    #[must_use]
    pub fn deezer_base_url(mut self, url: impl Into<String>) -> Self {
        self.deezer_base_url = Some(url.into());
        self
    }

    /// Use an already opened store
    #[must_use]
    pub fn storage(mut self, storage: LocalStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Open the store at this path instead of the default one
    #[must_use]
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    /// Replace the default CORS origins
    #[must_use]
    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Builds the config, opening the store and Deezer client as needed.
    ///
    /// Explicit clients win over URLs/paths, which win over defaults.
    pub async fn build(self) -> Result<Config> {
        let deezer = match (self.deezer, self.deezer_base_url) {
            (Some(d), _) => d,
            (None, Some(url)) => DeezerClient::new(&url)?,
            (None, None) => DeezerClient::try_default()?,
        };
        let storage = match (self.storage, self.db_path) {
            (Some(s), _) => s,
            (None, Some(path)) => LocalStorage::open(&path).await?,
            (None, None) => LocalStorage::try_default().await?,
        };
        let cors_origins = self
            .cors_origins
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(ToString::to_string).collect());

        Ok(Config {
            deezer: Arc::new(deezer),
            storage: Arc::new(storage),
            cors_origins,
        })
    }
}
