/// Deezer API passthrough client
pub mod deezer;
/// Data entities for favorites and artist details
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Favorites storage using `DuckDB`
pub mod local_storage;

pub use deezer::DeezerClient;
pub use local_storage::LocalStorage;
