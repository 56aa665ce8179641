//! Binary entrypoint for the wishlist HTTP server.
//!
//! Configuration comes from environment variables, see [`ServerConfig`].

use wishlist_server::config::ServerConfig;
use wishlist_server::router::build_router;
use wishlist_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let addr = config.addr();
    let state = AppState::new(config);
    let app = build_router(state);

    tracing::info!("wishlist server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
