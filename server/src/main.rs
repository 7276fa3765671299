use anyhow::Result;
use axum::Router;
use clap::Parser;
use recommender::{Recommender, VectorizerConfig, DEFAULT_MAX_FEATURES};
use server::posters::{CachedPosters, NoPosters, OmdbPosters, PosterSource};
use server::{build_app, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Movies corpus (.csv, .json, .jsonl or a directory)
    #[arg(long, default_value = "./data/movies.csv")]
    data: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    /// Vocabulary size cap
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    max_features: usize,
    /// OMDb API key for poster images; posters are skipped when unset
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    omdb_api_key: Option<String>,
    /// Number of poster lookups to remember
    #[arg(long, default_value_t = 2048)]
    poster_cache: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = VectorizerConfig { max_features: Some(args.max_features), ..VectorizerConfig::default() };
    let recommender = Recommender::from_path(&args.data, config)?;

    let posters: Arc<dyn PosterSource> = match args.omdb_api_key.filter(|k| !k.is_empty()) {
        Some(key) => Arc::new(CachedPosters::new(OmdbPosters::new(key)?, args.poster_cache)),
        None => {
            tracing::info!("OMDB_API_KEY not set, posters disabled");
            Arc::new(NoPosters)
        }
    };
    let app: Router = build_app(AppState::new(recommender, posters));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
