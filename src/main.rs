use anyhow::Result;
use transformer_diagnostics::{api, config, controller, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;
    let app_state = controller::AppState::new(cfg.clone()).await?;
    let app = api::router(app_state.clone(), &cfg);

    let addr = cfg.server.socket_addr()?;
    if cfg.server.host == "0.0.0.0" {
        warn!("server binding to 0.0.0.0; the dashboard will be reachable from the network");
    }

    info!(%addr, "starting transformer diagnostics dashboard");

    let refresh = controller::spawn_controller_tasks(&app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal(app_state.shutdown.clone()))
        .await?;

    app_state.shutdown.cancel();
    if let Err(e) = refresh.await {
        warn!(error = %e, "refresh loop ended abnormally");
    }

    warn!("shutdown complete");
    Ok(())
}
