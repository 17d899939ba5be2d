use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{error, info};

use rollcall::config::ServerConfig;
use rollcall::logging::{init_tracing, shutdown_tracer};
use rollcall::metrics::{init_metrics, metrics_app, metrics_port};
use rollcall::middleware::rate_limit::spawn_limiter_pruning;
use rollcall::router::init_router;
use rollcall::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;
    rollcall_db::run_migrations(&state.db).await?;

    match init_metrics() {
        Ok(Some(handle)) => {
            let addr = SocketAddr::from(([0, 0, 0, 0], metrics_port()));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Metrics available at http://{}/metrics", addr);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                    error!(error = %e, "Metrics server stopped");
                }
            });
        }
        Ok(None) => info!("Observability disabled; metrics server not started"),
        Err(e) => error!(error = %e, "Failed to install Prometheus recorder"),
    }

    if state.rate_limit_config.enabled {
        spawn_limiter_pruning(state.rate_limiter.clone());
    }

    let server_config = ServerConfig::from_env();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server running on http://{}", server_config.address());
    info!("Swagger UI available at http://{}/swagger-ui", server_config.address());
    info!("Scalar UI available at http://{}/scalar", server_config.address());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        tokio::signal::ctrl_c().await.ok();
    })
    .await?;

    shutdown_tracer().await;
    Ok(())
}
