//! nerlabel-server - records NER annotations and exports them as BIO datasets.

use clap::Parser;
use nerlabel::{Compiler, InMemoryStore};
use nerlabel_server::{serve, sweep_stale_exports, AppState, ServerArgs};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "nerlabel=info,nerlabel_server=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();

    if !args.skip_sweep {
        match sweep_stale_exports(&std::env::temp_dir(), &args.export_prefix) {
            Ok(0) => {}
            Ok(removed) => tracing::info!("Cleaned up {} old temporary export files", removed),
            Err(e) => tracing::warn!(error = %e, "could not sweep the temp dir"),
        }
    }

    let state = AppState::new(
        Arc::new(InMemoryStore::new()),
        Compiler::default(),
        &args.export_prefix,
    );
    serve(&args, state).await
}
