use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::clients::{
    DeezerClient, LocalStorage,
    entities::{ArtistDetails, Favorite, FavoriteKey},
    errors::{Error, Result},
};
use crate::config::Config;

/// Handles shared by every request
#[derive(Clone)]
pub struct AppState {
    /// Upstream proxy client
    pub deezer: Arc<DeezerClient>,
    /// Favorites store
    pub storage: Arc<LocalStorage>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct Ack {
    message: &'static str,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::UpstreamError(_) | Error::UpstreamDeserializationError(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::StorageError(_) | Error::ConfigurationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        error!("Request failed with {status}: {self}");
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router with CORS and request logging applied.
pub fn router(config: &Config) -> Result<Router> {
    let state = AppState {
        deezer: Arc::clone(&config.deezer),
        storage: Arc::clone(&config.storage),
    };

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                Error::ConfigurationError(format!("Invalid CORS origin {origin:?}: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/search", get(search_artists))
        .route("/artist/{artist_id}", get(get_artist))
        .route(
            "/favorites",
            get(list_favorites)
                .post(add_favorite)
                .delete(remove_favorite),
        )
        .route("/favorites/{artist_id}", delete(remove_favorite_by_id))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_request))
        .layer(cors))
}

/// Serves the API on `addr` until Ctrl-C is received.
pub async fn serve(config: Config, addr: SocketAddr) -> Result<()> {
    let app = router(&config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
}

// A signal that can't be registered must not stop the server, so wait forever
async fn wait_for_signal(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{method} {uri} {} {:?}",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn search_artists(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    Ok(Json(state.deezer.search_artists(&params.q).await?))
}

async fn get_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Result<Json<ArtistDetails>> {
    Ok(Json(state.deezer.get_artist(&artist_id).await?))
}

async fn list_favorites(State(state): State<AppState>) -> Result<Json<Vec<Favorite>>> {
    Ok(Json(state.storage.list().await?))
}

async fn add_favorite(
    State(state): State<AppState>,
    Json(favorite): Json<Favorite>,
) -> Result<Json<Ack>> {
    state.storage.add(favorite).await?;
    Ok(Json(Ack {
        message: "Favorite added",
    }))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Json(key): Json<FavoriteKey>,
) -> Result<Json<Ack>> {
    remove(&state, &key.artist_id).await
}

async fn remove_favorite_by_id(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> Result<Json<Ack>> {
    remove(&state, &artist_id).await
}

async fn remove(state: &AppState, artist_id: &str) -> Result<Json<Ack>> {
    state.storage.remove(artist_id).await?;
    Ok(Json(Ack {
        message: "Favorite removed",
    }))
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}
