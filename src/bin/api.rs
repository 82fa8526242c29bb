use tracing::info;

use blume_admin_mock::{
    config::AppConfig,
    logging::init_tracing,
    mock_client::MockApiClient,
    routes::{router, AppState},
    services::InMemoryService,
};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    init_tracing();

    let service = InMemoryService::from_config(&config.dataset);
    let client = MockApiClient::new(service, config.mock.clone());
    let app = router(AppState::new(client));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind HTTP listener");
    info!(
        delay_ms = config.mock.delay.as_millis() as u64,
        error_rate = config.mock.error_rate,
        "mock API listening on http://{}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server crashed");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    }
    info!("shutdown signal received");
}
