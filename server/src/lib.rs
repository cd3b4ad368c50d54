//! HTTP service of the annotation tool.
//!
//! Records annotations into named datasets and exports them as token-level BIO datasets:
//! - Annotation recording and listing
//! - Dataset export as a downloadable JSON attachment
//! - Per-dataset and global statistics

mod config;
mod error;
mod export;
mod handlers;
mod routes;
mod sweep;

pub use config::{ServerArgs, DEFAULT_EXPORT_PREFIX};
pub use error::ServerError;
pub use export::{export_file_name, ExportArtifact};
pub use handlers::{SaveAnnotationRequest, SaveAnnotationResponse};
pub use routes::create_router;
pub use sweep::sweep_stale_exports;

use nerlabel::{AnnotationStore, Compiler};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnnotationStore>,
    pub compiler: Arc<Compiler>,
    /// Prefix of the temporary export directories.
    pub export_prefix: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn AnnotationStore>, compiler: Compiler, export_prefix: &str) -> Self {
        Self {
            store,
            compiler: Arc::new(compiler),
            export_prefix: Arc::from(export_prefix),
        }
    }
}

/// Start the web server and run it until ctrl-c.
pub async fn serve(args: &ServerArgs, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state, args.static_dir.as_deref());

    let addr: SocketAddr = args.address().parse()?;
    tracing::info!("Starting server at http://{}", addr);
    if let Some(dir) = &args.static_dir {
        tracing::info!(static_dir = %dir.display(), "serving static files");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
