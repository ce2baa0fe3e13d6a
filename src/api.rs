use std::{collections::HashMap, path::Path, sync::Arc};

use anyhow::{Error, Result};
use axum::{
    Router,
    body::Bytes,
    extract::{Request, State, rejection::BytesRejection},
    http::{HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Local;
use tokio::{net::TcpListener, signal};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    clients::{Notifier, TelegramClient},
    config::Config,
    error::ApiError,
    models::{
        health::{HealthCheckResponse, ServiceHealth},
        response::ApiResponse,
        submission::{Submission, SubmissionKind},
    },
    render::render_submission,
};

pub struct AppState {
    notifier: Arc<dyn Notifier>,
    currency_symbol: String,
}

impl AppState {
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}

pub fn build_router(state: AppState, site_dir: &Path) -> Router {
    Router::new()
        .route("/api/order", post(submit_order).options(preflight))
        .route("/api/request", post(submit_request).options(preflight))
        .route("/health", get(health_check))
        .fallback_service(ServeDir::new(site_dir))
        .layer(middleware::from_fn(hidden_files_middleware))
        .layer(middleware::from_fn(cors_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn run_api_server(config: Config) -> Result<(), Error> {
    let notifier = Arc::new(TelegramClient::new(&config)?);
    let state = AppState::new(&config, notifier);
    let app = build_router(state, &config.site_dir);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        address = %addr,
        site_dir = %config.site_dir.display(),
        "Notification server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn submit_order(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let body = body.inspect_err(|e| warn!(error = %e, "Failed to read request body"))?;
    handle_submission(&state, SubmissionKind::Order, &body).await
}

async fn submit_request(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let body = body.inspect_err(|e| warn!(error = %e, "Failed to read request body"))?;
    handle_submission(&state, SubmissionKind::Inquiry, &body).await
}

async fn handle_submission(
    state: &AppState,
    kind: SubmissionKind,
    body: &[u8],
) -> Result<Json<ApiResponse>, ApiError> {
    let submission = Submission::parse(kind, body)
        .inspect_err(|e| warn!(?kind, error = %e, "Rejected submission"))?;

    info!(
        ?kind,
        contact_type = submission.contact().kind.as_str(),
        "Forwarding submission"
    );

    let message = render_submission(
        &submission,
        Local::now().naive_local(),
        &state.currency_symbol,
    );

    let result = state.notifier.send(message.as_str()).await;

    if result.success {
        Ok(Json(ApiResponse::success()))
    } else {
        Err(ApiError::DeliveryFailed)
    }
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let telegram = if state.notifier.is_configured() {
        ServiceHealth::healthy()
    } else {
        ServiceHealth::degraded("Telegram bot token or chat id is not configured".to_string())
    };

    let checks = HashMap::from([("telegram".to_string(), telegram)]);

    (StatusCode::OK, Json(HealthCheckResponse::from_checks(checks)))
}

/// Lets any origin call the API; applied to every response, static files
/// and errors included.
pub async fn cors_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );

    response
}

/// Answers 404 for any path with a segment starting with `.`, so files such
/// as `.env` or `.git/` inside the site directory are never served.
pub async fn hidden_files_middleware(req: Request, next: Next) -> Response {
    if is_hidden_path(req.uri().path()) {
        warn!(path = %req.uri().path(), "Refused request for hidden path");
        return StatusCode::NOT_FOUND.into_response();
    }

    next.run(req).await
}

fn is_hidden_path(path: &str) -> bool {
    path.split('/').any(|segment| {
        let segment = segment.to_ascii_lowercase();
        segment.starts_with('.') || segment.starts_with("%2e")
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
