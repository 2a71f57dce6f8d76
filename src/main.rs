use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use bookshelf::logging::init_tracing;
use bookshelf::router::init_router;
use bookshelf::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;

    let state = init_app_state().await?;
    let router = init_router().context("route registration failed")?;
    let app = router.into_service(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "server running");
    axum::serve(listener, app).await?;

    Ok(())
}
