//! Application startup and lifecycle management.

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::security_headers::security_headers_middleware;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::sync::Arc;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::InvoicingConfig;
use crate::handlers::{
    auth::{login, logout},
    health::{health_check, metrics_handler, readiness_check},
    invoices::{create_invoice, delete_invoice, update_invoice},
};
use crate::middleware::require_session;
use crate::services::{
    init_metrics, AuthService, Database, HealthCheck, InvoiceActions, InvoiceStore, UserStore,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: InvoicingConfig,
    pub actions: InvoiceActions,
    pub auth: AuthService,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Wire every component to the same store handle.
    pub fn new<S>(config: InvoicingConfig, store: Arc<S>) -> Self
    where
        S: InvoiceStore + UserStore + HealthCheck + 'static,
    {
        Self {
            config,
            actions: InvoiceActions::new(store.clone()),
            auth: AuthService::new(store.clone()),
            health: store,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.session.secure_cookie)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            state.config.session.expiry_hours,
        )));

    let dashboard = Router::new()
        .route("/dashboard/invoices", post(create_invoice))
        .route("/dashboard/invoices/:id", post(update_invoice))
        .route("/dashboard/invoices/:id/delete", post(delete_invoice))
        .route_layer(from_fn(require_session));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(dashboard)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    db: Arc<Database>,
    state: AppState,
}

impl Application {
    /// Connect to PostgreSQL and bind the HTTP listener.
    pub async fn build(config: InvoicingConfig) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;
        let db = Arc::new(db);

        let state = AppState::new(config.clone(), db.clone());

        let addr = format!("{}:{}", config.common.host, config.common.port);
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Invoicing service listener bound");

        Ok(Self {
            port,
            listener,
            db,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Handle to the pool, for closing it on shutdown.
    pub fn db(&self) -> Arc<Database> {
        self.db.clone()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        tracing::info!(
            service = "invoicing-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
