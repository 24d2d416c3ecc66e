mod config;
mod report;
mod store;
mod submission;
mod utils;
mod web;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, utils::docx_to_pdf::locate_office_binary, web::AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(err) = app_main().await {
        error!(?err, "application error");
        std::process::exit(1);
    }
}

async fn app_main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let port = config.port;
    let page_size = config.store.page_size;

    let soffice_bin = &config.report.soffice_bin;
    match locate_office_binary(soffice_bin) {
        Some(path) => info!(path = %path.display(), "PDF export enabled"),
        None => warn!(
            soffice_bin = %soffice_bin,
            "office binary not found; PDF export will fail until SOFFICE_BIN points at LibreOffice"
        ),
    }

    let state = AppState::new(config);
    info!(
        table_url = %state.store().table_url(),
        page_size,
        "registration store configured"
    );
    let app = web::router::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "listening");

    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
