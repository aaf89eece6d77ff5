mod app_state;
mod config;
mod database;
mod models;
mod routes;
mod sanitize;
mod seed;
pub use app_state::AppState;
pub use config::Config;

use crate::routes::make_app;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::init();
    config::init_tracing(&config.log_filter);

    let addr = config.server_addr.clone();
    let app = make_app(config).await?;
    let listener = TcpListener::bind(&addr).await?;
    info!("🚀 Server started successfully on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
