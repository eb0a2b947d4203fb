//! `awbrecon-server` — HTTP surface for the reconciliation engine.
//!
//! Three routes: an upload form, a compare endpoint that runs the engine and
//! renders the result page, and a download endpoint serving the most recent
//! comparison's two result tables.

pub mod render;
pub mod routes;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use handlebars::Handlebars;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::store::ArtifactStore;

pub const DEFAULT_PORT: u16 = 8000;

/// Uploads are buffered in memory; large-file streaming is out of scope.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub struct AppState {
    templates: Handlebars<'static>,
    pub store: RwLock<ArtifactStore>,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let mut templates = Handlebars::new();
        templates.register_template_string("index", render::INDEX_TEMPLATE)?;
        templates.register_template_string("results", render::RESULTS_TEMPLATE)?;
        Ok(Self {
            templates,
            store: RwLock::new(ArtifactStore::default()),
        })
    }

    pub fn render_index(&self) -> Result<String, handlebars::RenderError> {
        self.templates.render("index", &())
    }

    pub fn render_results(
        &self,
        report: &awbrecon_core::ReconReport,
        artifacts: &[awbrecon_io::Artifact],
    ) -> Result<String, handlebars::RenderError> {
        self.templates
            .render("results", &render::results_context(report, artifacts))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/compare", post(routes::compare))
        .route("/download/{name}", get(routes::download))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(port: u16) -> Result<()> {
    let state = Arc::new(AppState::new()?);
    let addr: SocketAddr = format!("127.0.0.1:{port}").parse()?;
    let router = build_router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
