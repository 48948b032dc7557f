use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A saved artist, unique by `artist_id`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Deezer artist id
    pub artist_id: String,
    /// Display name captured when the favorite was added
    pub artist_name: String,
}

impl Favorite {
    /// Creates a favorite from an id and display name
    pub fn new(artist_id: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Favorite {
            artist_id: artist_id.into(),
            artist_name: artist_name.into(),
        }
    }
}

/// Body of a remove request. Extra fields such as `artist_name` are ignored.
#[derive(Deserialize, Debug)]
pub struct FavoriteKey {
    /// Deezer artist id to remove
    pub artist_id: String,
}

/// Albums and top tracks of one artist, both relayed as returned by Deezer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArtistDetails {
    /// Body of `/artist/{id}/albums`
    pub albums: Value,
    /// Body of `/artist/{id}/top`
    pub top_tracks: Value,
}
