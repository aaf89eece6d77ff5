mod health;
mod profile;
mod swagger;
use crate::{database, seed};
use health::health_checker_handler;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{AppState, Config};

use axum::{routing::get, Router};
use std::sync::Arc;

/// Connects and migrates the database, seeds the test user if it is empty, then builds the router.
pub async fn make_app(config: Config) -> anyhow::Result<Router> {
    info!("Connecting to SQLite at {}...", config.db_url);
    let sqlx_db_connection = database::connect_sqlx(&config.db_url).await?;
    database::migrate(&sqlx_db_connection).await?;
    info!("Connected to SQLite!");

    let db = database::SqliteDatabase::new(sqlx_db_connection);
    seed::seed_test_user(&db).await?;

    let state = Arc::new(AppState { db });
    let ret = Router::new()
        .route("/api", get(health_checker_handler))
        .route("/api/health", get(health_checker_handler))
        .merge(profile::profile_routes())
        .merge(swagger::build_documentation())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    Ok(ret)
}
