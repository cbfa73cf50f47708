use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventario_api::{
    app::{build_router, cors_layer},
    config::AppConfig,
    db::{create_pool, ensure_schema, orm_from_pool},
    state::AppState,
    store::PgProductStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventario_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    if config.auth.insecure_skip_signature {
        tracing::warn!(
            "AUTH_INSECURE_SKIP_SIGNATURE enabled: bearer tokens are checked for expiry only"
        );
    } else if config.auth.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET not set: protected routes will reject every request");
    }

    let pool = create_pool(&config.database_url)?;
    ensure_schema(&pool).await;

    let store = Arc::new(PgProductStore::new(orm_from_pool(&pool)));
    let state = AppState::new(store, config.auth.clone());

    let app = build_router(state, &config.static_dir, cors_layer(&config.cors_origins));

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!(environment = %config.environment, "listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
