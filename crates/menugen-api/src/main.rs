use anyhow::Result;
use menugen_api::{build_router, config::Settings, AppState};
use menugen_shared::telemetry::init_telemetry;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::load()?;

    // Initialize logging
    init_telemetry("menugen-api", "info,menugen_api=debug,tower_http=info", &settings.logging)?;

    info!("🚀 Starting MenuGen API server...");
    info!(
        "✅ Configuration loaded (vision: {}, images: {}, upload limit: {} bytes)",
        settings.openai.vision_model, settings.openai.image_model, settings.upload.max_bytes
    );

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    let state = AppState::new(settings)?;
    let app = build_router(state)?;

    info!("🎯 Server listening on {}", addr);
    info!("📡 Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
