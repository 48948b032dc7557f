use log::debug;
use reqwest::{Url, header};
use serde_json::Value;

use crate::clients::{
    entities::ArtistDetails,
    errors::{Error, Result},
};

/// Public Deezer API, used when no other base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://api.deezer.com";

/// Passthrough client for the public Deezer REST API.
///
/// Bodies are returned as parsed JSON without any reshaping, whatever
/// status code Deezer answered with.
pub struct DeezerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DeezerClient {
    /// Creates a client rooted at `base_url`, which must be an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::ConfigurationError(format!("Invalid Deezer base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::ConfigurationError(format!(
                "Deezer base URL {base_url} cannot have path segments"
            )));
        }
        let http = reqwest::Client::builder().build()?;
        Ok(DeezerClient { http, base_url })
    }

    /// Creates a client for the public Deezer API.
    pub fn try_default() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /search/artist?q=`, body relayed as is.
    pub async fn search_artists(&self, query: &str) -> Result<Value> {
        let url = self.endpoint(&["search", "artist"]);
        debug!("Searching Deezer artists for {query:?}");
        self.get_json(url, &[("q", query)]).await
    }

    /// Albums and top tracks of one artist.
    ///
    /// Both are fetched concurrently; either failure fails the lookup.
    pub async fn get_artist(&self, artist_id: &str) -> Result<ArtistDetails> {
        let albums_url = self.endpoint(&["artist", artist_id, "albums"]);
        let top_url = self.endpoint(&["artist", artist_id, "top"]);
        debug!("Fetching Deezer albums and top tracks for artist {artist_id}");

        let (albums, top_tracks) =
            futures::try_join!(self.get_json(albums_url, &[]), self.get_json(top_url, &[]))?;
        Ok(ArtistDetails { albums, top_tracks })
    }

    // Each segment is percent-encoded, so ids can't escape into other paths
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url, query: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Deezer answered {status} with {} bytes", body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}
