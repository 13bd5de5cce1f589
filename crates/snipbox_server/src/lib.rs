//! HTTP server wiring for snipbox (router, handlers, and shared state).

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for snippet endpoints.
pub mod handlers;

pub use snipbox_core::{config, models, store, AppError, Config, SnippetStore};

use axum::{
    extract::DefaultBodyLimit,
    http::header,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnippetStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    /// - `store`: Open snippet store.
    ///
    /// # Returns
    /// A new [`AppState`].
    pub fn new(config: Config, store: SnippetStore) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
///
/// # Returns
/// Configured `axum::Router`.
///
/// # Panics
/// Panics if static loopback origin values fail to parse (should not happen).
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let cors_port = state.config.port;

    // CORS stays locked to loopback origins unless public access is requested
    let cors = if allow_public_access {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers(tower_http::cors::Any)
    } else {
        CorsLayer::new()
            .allow_origin([
                format!("http://localhost:{}", cors_port).parse().unwrap(),
                format!("http://127.0.0.1:{}", cors_port).parse().unwrap(),
            ])
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    };

    Router::new()
        .route("/api/snippet", post(handlers::snippet::create_snippet))
        .route("/api/snippet/:id", get(handlers::snippet::get_snippet))
        .route("/api/snippets", get(handlers::snippet::latest_snippets))
        .with_state(state.clone())
        .layer(
            tower::ServiceBuilder::new()
                // Headroom over max_snippet_size so oversize content reaches
                // the handler's 400 instead of a blunt 413 at the body limit.
                .layer(DefaultBodyLimit::max(
                    state.config.max_snippet_size.saturating_mul(2),
                ))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}

/// Resolve the listener address from env var overrides and security policy.
///
/// # Arguments
/// - `config`: Server configuration containing the configured `port`.
/// - `allow_public_access`: Whether non-loopback bind targets are permitted.
///
/// # Returns
/// A validated socket address that enforces loopback when public access is disabled.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let override_value = std::env::var("BIND").ok();
    resolve_bind_override(override_value.as_deref(), config, allow_public_access)
}

fn resolve_bind_override(
    override_value: Option<&str>,
    config: &Config,
    allow_public_access: bool,
) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match override_value {
        Some(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        None => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

/// Run the axum server with graceful shutdown support.
///
/// # Arguments
/// - `listener`: Bound TCP listener for the server.
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
/// - `shutdown_signal`: Future that resolves when shutdown should start.
///
/// # Returns
/// `Ok(())` when the server exits cleanly.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state, allow_public_access);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::{create_app, resolve_bind_override, AppState};
    use snipbox_core::{Config, SnippetStore};
    use std::net::SocketAddr;

    fn test_config(port: u16, max_snippet_size: usize) -> Config {
        Config {
            db_path: String::from("/tmp/snipbox-test-db"),
            port,
            max_snippet_size,
        }
    }

    #[test]
    fn resolve_bind_override_enforces_loopback_when_public_access_disabled() {
        let config = test_config(4040, 1024);

        // No override
        assert_eq!(
            resolve_bind_override(None, &config, false),
            SocketAddr::from(([127, 0, 0, 1], 4040))
        );

        let forced = resolve_bind_override(Some("0.0.0.0:4040"), &config, false);
        assert_eq!(forced.ip().to_string(), "127.0.0.1");
        assert_eq!(forced.port(), 4040);

        let public = resolve_bind_override(Some("0.0.0.0:4040"), &config, true);
        assert_eq!(public, SocketAddr::from(([0, 0, 0, 0], 4040)));

        let fallback = resolve_bind_override(Some("bad:host"), &config, false);
        assert_eq!(fallback, SocketAddr::from(([127, 0, 0, 1], 4040)));
    }

    #[tokio::test]
    async fn create_app_tolerates_a_maximal_snippet_size() {
        let store = SnippetStore::in_memory().await.expect("in-memory store");
        let state = AppState::new(test_config(4040, usize::MAX), store);

        // Body-limit headroom must saturate rather than overflow.
        let _app = create_app(state, false);
    }
}
