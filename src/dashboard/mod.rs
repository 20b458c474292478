use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::views::ViewAssembler;

#[derive(Clone)]
pub struct DashboardState {
    pub assembler: ViewAssembler,
}

/// Build the dashboard router.
///
/// Routes:
/// - `GET /` redirects to `dashboard`
/// - `GET /dashboard` agent identity
/// - `GET /dashboard/jobs` jobs with their health
/// - `GET /dashboard/jobs/:job/executions` grouped execution history
/// - `GET /dashboard/static/*` UI assets, when a static directory is given
pub fn router(state: DashboardState, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/", get(root_redirect_handler))
        .route("/dashboard", get(index_handler))
        .route("/dashboard/jobs", get(jobs_handler))
        .route("/dashboard/jobs/:job/executions", get(executions_handler));

    if let Some(dir) = static_dir {
        app = app.nest_service("/dashboard/static", ServeDir::new(dir));
    }

    app.layer(cors).with_state(state)
}

pub async fn run_dashboard(
    addr: SocketAddr,
    state: DashboardState,
    static_dir: Option<PathBuf>,
    shutdown: CancellationToken,
) {
    let app = router(state, static_dir);

    tracing::info!(addr = %addr, "Starting dashboard server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind dashboard server");
            return;
        }
    };

    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await });
    if let Err(e) = serve.await {
        tracing::error!(error = %e, "Dashboard server failed");
    }
    tracing::info!("Dashboard server stopped");
}

/// Serialize a view. A failure is logged and answered with a bare 500;
/// it never takes the server down.
fn render<T: Serialize>(view_name: &str, view: &T) -> Response {
    match serde_json::to_vec(view) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::error!(view = view_name, error = %e, "Failed to render view");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn root_redirect_handler() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "dashboard")],
    )
}

async fn index_handler(State(state): State<DashboardState>) -> Response {
    let view = state.assembler.index_view().await;
    render("index", &view)
}

async fn jobs_handler(State(state): State<DashboardState>) -> Response {
    let view = state.assembler.job_list_view().await;
    render("jobs", &view)
}

async fn executions_handler(
    State(state): State<DashboardState>,
    Path(job): Path<String>,
) -> Response {
    let view = state.assembler.execution_list_view(&job).await;
    render("executions", &view)
}
