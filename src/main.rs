use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use drivesync::config::environment::EnvironmentConfig;
use drivesync::routes::create_router;
use drivesync::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::default();

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚚 DriveSync - Logistics booking API");
    info!("====================================");
    info!("⚙️  Environment: {}", config.environment);
    info!("⛽ Default fuel price: {}", config.default_fuel_price);
    if config.is_development() {
        warn!("🧪 Development mode: set JWT_SECRET and ADMIN_PASSWORD before deploying");
    }

    let addr = config.server_url();
    let app_state = AppState::new(config)
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    let app = create_router(app_state);

    info!("🌐 Server starting on http://{}", addr);
    info!("🔍 Available endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/login - Admin login");
    info!("📦 Booking:");
    info!("   GET  /api/districts - Known districts");
    info!("   POST /api/requests - Submit transport request");
    info!("   GET  /api/clients/:client_name/dashboard - Client dashboard");
    info!("🚗 Drivers:");
    info!("   GET  /api/drivers/:driver_name/dashboard - Driver dashboard");
    info!("   POST /api/trips/start - Start trip");
    info!("   POST /api/trips/stop - Stop trip");
    info!("🔐 Admin (Bearer token):");
    info!("   GET  /api/admin/dashboard - Full overview");
    info!("   POST /api/admin/accounts - Create account");
    info!("   POST /api/admin/vehicles - Register vehicle");
    info!("   POST /api/admin/vehicles/assign - Assign vehicle to driver");
    info!("   PUT  /api/admin/vehicles/:registration_number/rate - Update fuel rate");
    info!("   POST /api/admin/fuel-price - Set fuel price");
    info!("   POST /api/admin/requests/:request_id/process - Process request");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Terminate signal received, shutting down...");
        },
    }
}
