use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::{app, error::AppError, services::store::SnapshotStore, telemetry};

pub async fn run() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let store = SnapshotStore::from_env();
    let initial = store.load().await;
    tracing::info!(
        path = %store.path().display(),
        items = initial.items.len(),
        sections = initial.sections.len(),
        "Board loaded"
    );

    let state = app::state::AppState::new(initial, store)?;
    let app = app::router::build_router(state);

    let port = read_env_u16("PORT").unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::Internal(format!("bind failed: {}", err)))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::Internal(format!("server error: {}", err)))?;
    Ok(())
}

fn read_env_u16(key: &str) -> Option<u16> {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
}
