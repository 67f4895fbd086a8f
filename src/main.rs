use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tower_http::trace::TraceLayer;

use qtify::{
    cleanup,
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    middleware::catch_panic_layer,
    routes::router,
    spotify::SpotifyClient,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging.rust_log);

    let spotify_cfg = cfg.spotify.clone().context(
        "spotify credentials are required (APP_SPOTIFY__CLIENT_ID / APP_SPOTIFY__CLIENT_SECRET)",
    )?;

    let db = connection::connect(&cfg.database).await?;
    let state = AppState::new(cfg, db, SpotifyClient::new(spotify_cfg));

    cleanup::spawn(Arc::clone(&state));

    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!(
        "{}:{}",
        state.config.general.host.as_str(),
        state.config.general.port
    )
    .parse()
    .context("invalid host/port")?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
