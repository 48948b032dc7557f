use async_duckdb::ClientBuilder;
use async_duckdb::duckdb::params;
use log::debug;
use std::path::{Path, PathBuf};

use crate::clients::entities::Favorite;
use crate::clients::errors::Result;

enum Table {
    Favorite,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Favorite => "favorite",
        }
    }
}

/// Favorites list persisted in a `DuckDB` file
pub struct LocalStorage {
    client: async_duckdb::Client,
}

impl LocalStorage {
    /// Opens (or creates) the database at `db_path` and makes sure the schema exists.
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let client = ClientBuilder::new().path(db_path).open().await?;
        debug!("Opened local storage database at {db_path:?}");

        let storage = LocalStorage { client };
        storage.init_db().await?;
        Ok(storage)
    }

    /// Opens the database at [`LocalStorage::default_path`].
    pub async fn try_default() -> Result<Self> {
        Self::open(&Self::default_path()).await
    }

    /// `favorites.duckdb` under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if data directory can't be determined
            .join("artist-explorer")
            .join("favorites.duckdb")
    }

    /// Creates the favorites table if it doesn't exist yet.
    pub async fn init_db(&self) -> Result<()> {
        // position only records insertion order, artist_id is the identity
        let table_query = format!(
            "
            CREATE SEQUENCE IF NOT EXISTS {seq} START 1;
            CREATE TABLE IF NOT EXISTS {favorite_table} (
                artist_id TEXT PRIMARY KEY,
                artist_name TEXT NOT NULL,
                position BIGINT DEFAULT nextval('{seq}')
            );
        ",
            seq = "favorite_position_seq",
            favorite_table = Table::Favorite.as_str()
        );
        self.client
            .conn(move |conn| conn.execute_batch(&table_query))
            .await?;

        debug!("Successfully initialized local storage database");
        Ok(())
    }

    /// Fetch all favorites, oldest first
    pub async fn list(&self) -> Result<Vec<Favorite>> {
        let query = format!(
            "SELECT artist_id, artist_name FROM {} ORDER BY position;",
            Table::Favorite.as_str()
        );

        let favorites = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(&query)?;
                let mut rows = stmt.query([])?;
                let mut favorites = vec![];
                while let Some(row) = rows.next()? {
                    favorites.push(Favorite {
                        artist_id: row.get(0)?,
                        artist_name: row.get(1)?,
                    });
                }
                Ok(favorites)
            })
            .await?;

        Ok(favorites)
    }

    /// Inserts the favorite unless its `artist_id` is already stored.
    /// An existing row keeps its original name.
    pub async fn add(&self, favorite: Favorite) -> Result<()> {
        let query = format!(
            "INSERT OR IGNORE INTO {} (artist_id, artist_name) VALUES (?1, ?2);",
            Table::Favorite.as_str()
        );
        let Favorite {
            artist_id,
            artist_name,
        } = favorite;

        let inserted = self
            .client
            .conn(move |conn| conn.execute(&query, params![artist_id, artist_name]))
            .await?;

        if inserted == 0 {
            debug!("Favorite already stored, nothing inserted");
        } else {
            debug!("Stored new favorite in local storage");
        }
        Ok(())
    }

    /// Deletes the favorite if present, absent ids are not an error.
    pub async fn remove(&self, artist_id: &str) -> Result<()> {
        let query = format!("DELETE FROM {} WHERE artist_id = ?1;", Table::Favorite.as_str());
        let artist_id_owned = artist_id.to_string();

        let removed = self
            .client
            .conn(move |conn| conn.execute(&query, [artist_id_owned.as_str()]))
            .await?;

        debug!("Removed {removed} favorite(s) with artist_id {artist_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    async fn open_storage() -> (TempDir, LocalStorage) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("favorites.duckdb");
        let storage = LocalStorage::open(&db_path).await.unwrap();
        (temp_dir, storage)
    }

    #[tokio::test]
    async fn test_open_creates_parent_dirs() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("favorites.duckdb");

        let storage = LocalStorage::open(&db_path).await.unwrap();
        assert!(storage.list().await.unwrap().is_empty());
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let (_dir, storage) = open_storage().await;
        storage.add(Favorite::new("27", "Daft Punk")).await.unwrap();

        storage.init_db().await.unwrap();

        assert_eq!(
            storage.list().await.unwrap(),
            vec![Favorite::new("27", "Daft Punk")]
        );
    }

    #[tokio::test]
    async fn test_list_after_add_contains_favorite() {
        let (_dir, storage) = open_storage().await;

        storage.add(Favorite::new("27", "Daft Punk")).await.unwrap();
        storage.add(Favorite::new("13", "Eminem")).await.unwrap();

        let favorites = storage.list().await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains(&Favorite::new("27", "Daft Punk")));
        assert!(favorites.contains(&Favorite::new("13", "Eminem")));
    }

    #[tokio::test]
    async fn test_add_same_artist_twice_keeps_one_row() {
        let (_dir, storage) = open_storage().await;

        storage.add(Favorite::new("27", "Daft Punk")).await.unwrap();
        storage.add(Favorite::new("27", "Daft Punk (renamed)")).await.unwrap();

        let favorites = storage.list().await.unwrap();
        assert_eq!(favorites, vec![Favorite::new("27", "Daft Punk")]);
    }

    #[tokio::test]
    async fn test_list_after_remove_drops_favorite() {
        let (_dir, storage) = open_storage().await;
        storage.add(Favorite::new("27", "Daft Punk")).await.unwrap();
        storage.add(Favorite::new("13", "Eminem")).await.unwrap();

        storage.remove("27").await.unwrap();

        assert_eq!(
            storage.list().await.unwrap(),
            vec![Favorite::new("13", "Eminem")]
        );
    }

    #[tokio::test]
    async fn test_remove_missing_artist_is_noop() {
        let (_dir, storage) = open_storage().await;
        storage.add(Favorite::new("13", "Eminem")).await.unwrap();

        storage.remove("does-not-exist").await.unwrap();

        assert_eq!(
            storage.list().await.unwrap(),
            vec![Favorite::new("13", "Eminem")]
        );
    }

    #[tokio::test]
    async fn test_readd_after_remove() {
        let (_dir, storage) = open_storage().await;
        storage.add(Favorite::new("27", "Daft Punk")).await.unwrap();
        storage.remove("27").await.unwrap();

        storage.add(Favorite::new("27", "Daft Punk")).await.unwrap();

        assert_eq!(
            storage.list().await.unwrap(),
            vec![Favorite::new("27", "Daft Punk")]
        );
    }
}
