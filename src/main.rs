mod api;
mod config;
mod error;
mod report;
mod report_file;
mod seed;
mod store;
mod types;

use actix_web::{App, HttpServer};
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::report_file::ReportFiles;
use crate::store::GradeStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let store = GradeStore::with_records(seed::load(config.reports.seed_file.as_deref())?);
    tracing::info!("Seeded grade store with {} records", store.len().await);

    std::fs::create_dir_all(&config.reports.dir)?;
    let reports = ReportFiles::new(config.reports.dir.clone());
    tracing::info!("Writing transient reports to {}", reports.dir().display());

    let state = AppState {
        store,
        reports,
        max_payload_bytes: config.reports.max_payload_bytes,
    };

    let bind = (config.server.host.clone(), config.server.port);
    tracing::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let mut server = HttpServer::new(move || {
        let state = state.clone();
        App::new().configure(move |cfg| api::configure(cfg, &state))
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server.bind(bind)?.run().await?;
    Ok(())
}
