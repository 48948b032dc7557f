//! Artist Explorer - Deezer artist search proxy with a local favorites list
//!
//! This library provides an HTTP API that relays artist searches and artist
//! details from Deezer, and stores a list of favorite artists in `DuckDB`.

/// Client modules for interacting with Deezer and local storage
pub mod clients;
/// Runtime configuration
pub mod config;
/// HTTP routes and handlers
pub mod server;
