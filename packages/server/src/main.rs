use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use judge::Judge0Client;
use server::config::AppConfig;
use server::state::AppState;
use server::{build_router, database, seed};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("server=info,judge=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    seed::seed_role_permissions(&db)
        .await
        .context("Failed to seed roles")?;
    seed::ensure_indexes(&db).await?;
    seed::seed_admin(&db, &config.auth)
        .await
        .context("Failed to seed admin account")?;

    let judge = Judge0Client::new(&config.judge).context("Invalid judge configuration")?;
    info!(base_url = %config.judge.base_url, "Judge client ready");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        judge: Arc::new(judge),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
