// File: services/slotsync_backend/src/main.rs
use slotsync_backend::routes::app;
use slotsync_backend::AppState;
use slotsync_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() {
    slotsync_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let state = AppState::new(config.clone())
        .await
        .expect("Failed to wire application state");

    // Log every slot-change announcement; real consumers subscribe the same
    // way and re-fetch the stored slots.
    let mut changes = state.notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(change) = changes.recv().await {
            info!("Slots changed for group {}", change.group_id);
        }
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app(state).into_make_service())
        .await
        .unwrap();
}
