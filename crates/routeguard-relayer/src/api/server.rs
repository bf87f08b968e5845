use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use routeguard_types::{RouteGuardError, RouteGuardResult};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers::{self, AppState};
use super::middleware::{rate_limit, ApiRateLimiter};
use crate::config::ApiConfig;
use crate::relay::RelayDispatcher;

pub struct ApiServer {
    config: ApiConfig,
    state: AppState,
    rate_limiter: Option<Arc<ApiRateLimiter>>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, dispatcher: RelayDispatcher) -> Self {
        let rate_limiter = if config.rate_limit_enabled {
            Some(Arc::new(ApiRateLimiter::new(
                config.requests_per_second,
                config.burst_size,
            )))
        } else {
            warn!("API rate limiting DISABLED");
            None
        };

        Self {
            config,
            state: AppState::new(dispatcher),
            rate_limiter,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config, self.rate_limiter.clone())
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    pub async fn serve<F>(self, shutdown: F) -> RouteGuardResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| RouteGuardError::Network(format!("Failed to bind API server to {}: {}", addr, e)))?;

        info!("API server listening on http://{}", addr);

        let cleanup = self.rate_limiter.clone().map(|limiter| {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(60));
                loop {
                    interval.tick().await;
                    limiter.cleanup();
                }
            })
        });

        let router = self.router();
        let result = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| RouteGuardError::Network(format!("API server error: {}", e)));

        if let Some(task) = cleanup {
            task.abort();
        }

        info!("API server stopped");
        result
    }
}

pub fn build_router(
    state: AppState,
    config: &ApiConfig,
    rate_limiter: Option<Arc<ApiRateLimiter>>,
) -> Router {
    let mut router = Router::new()
        .route(
            "/api/relay/report",
            post(handlers::submit_report).get(handlers::relay_status),
        )
        .route("/api/relay/status", get(handlers::relay_status))
        .route("/api/relay/claim", post(handlers::claim_rewards))
        .route("/api/reports/count", get(handlers::report_count))
        .route("/api/reports/:id", get(handlers::get_report))
        .route("/api/rewards/:commitment", get(handlers::pending_rewards))
        .route("/api/nullifiers/:nullifier", get(handlers::nullifier_status))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state);

    if let Some(limiter) = rate_limiter {
        router = router.layer(from_fn_with_state(limiter, rate_limit));
    }

    router = router
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http());

    if config.cors_enabled {
        router = router.layer(cors_layer(config));
    }

    router
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
