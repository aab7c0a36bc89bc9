use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use movie_recommender::{
    api::{create_router, AppState},
    catalog::Catalog,
    services::{PosterResolver, TmdbProvider},
    Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Refuse to serve on missing or inconsistent artifacts
    let catalog = Catalog::load(
        Path::new(&config.movies_path),
        Path::new(&config.similarity_path),
    )?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.poster_timeout_secs),
    )?;
    let posters = PosterResolver::new(Arc::new(provider), config.poster_base_url.clone())
        .with_max_in_flight(config.poster_concurrency);

    let state = AppState::new(
        Arc::new(catalog),
        posters,
        config.recommendation_count,
        config.max_recommendation_count,
    );
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
