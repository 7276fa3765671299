pub mod error;
pub mod filters;
pub mod mood;
pub mod posters;

use axum::{extract::{Path, Query, State}, routing::get, Json, Router};
use error::{ApiError, ApiResult};
use filters::{sort_movies, Filters, SortOrder};
use mood::Mood;
use posters::PosterSource;
use recommender::{MovieDetails, MovieId, Recommender, Resolution};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;
const AUTOCOMPLETE_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
    pub genre: Option<String>,
    pub year_min: Option<String>,
    pub year_max: Option<String>,
    pub sort: Option<String>,
}

#[derive(Deserialize)]
pub struct SimilarParams {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_k")]
    pub k: usize,
    pub genre: Option<String>,
    pub year_min: Option<String>,
    pub year_max: Option<String>,
    pub sort: Option<String>,
}

#[derive(Deserialize)]
pub struct AutocompleteParams {
    #[serde(default)]
    pub prefix: String,
}

#[derive(Deserialize)]
pub struct MoodParams {
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_mood_k")]
    pub k: usize,
}

fn default_k() -> usize { 8 }
fn default_mood_k() -> usize { 12 }
fn default_level() -> u32 { 50 }

fn clamp_k(k: usize) -> usize { k.clamp(1, MAX_K) }

/// A movie as served to clients, with its poster when one is known.
#[derive(Debug, Serialize)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: MovieDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<MovieCard>,
}

#[derive(Serialize)]
pub struct SimilarResponse {
    pub title: String,
    /// "exact", "similarity" or "none"
    pub matched_by: &'static str,
    pub matched: Option<MovieDetails>,
    pub took_s: f64,
    pub results: Vec<MovieCard>,
}

#[derive(Serialize)]
pub struct MoodResponse {
    pub level: u32,
    pub label: &'static str,
    pub query: String,
    pub results: Vec<MovieCard>,
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub posters: Arc<dyn PosterSource>,
}

impl AppState {
    pub fn new(recommender: Recommender, posters: Arc<dyn PosterSource>) -> Self {
        Self { recommender: Arc::new(recommender), posters }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/search", get(search_handler))
        .route("/api/similar", get(similar_handler))
        .route("/api/autocomplete", get(autocomplete_handler))
        .route("/api/genres", get(genres_handler))
        .route("/api/mood", get(mood_handler))
        .route("/api/movie/:movie_id", get(movie_handler))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

// CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
fn cors_layer() -> CorsLayer {
    match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    }
}

async fn with_posters(posters: &dyn PosterSource, movies: Vec<MovieDetails>) -> Vec<MovieCard> {
    let mut cards = Vec::with_capacity(movies.len());
    for movie in movies {
        let poster = posters.poster(&movie.title).await;
        cards.push(MovieCard { movie, poster });
    }
    cards
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = Instant::now();
    let query = params.q.trim().to_string();
    let hits = state.recommender.search_scored(&query, clamp_k(params.k));
    let total_hits = hits.len();

    let filters = Filters::from_params(params.genre.as_deref(), params.year_min.as_deref(), params.year_max.as_deref());
    let mut movies: Vec<MovieDetails> = hits
        .iter()
        .filter_map(|h| state.recommender.details(h.row, Some(h.score)))
        .filter(|m| filters.matches(m))
        .collect();
    sort_movies(&mut movies, SortOrder::parse(params.sort.as_deref()), false, |m| m);

    let results = with_posters(state.posters.as_ref(), movies).await;
    Json(SearchResponse { query, took_s: start.elapsed().as_secs_f64(), total_hits, results })
}

pub async fn similar_handler(State(state): State<AppState>, Query(params): Query<SimilarParams>) -> Json<SimilarResponse> {
    let start = Instant::now();
    let title = params.title.trim().to_string();
    let rec = &state.recommender;
    let resolution = rec.resolve(&title);
    let matched_by = match resolution {
        Resolution::Exact(_) => "exact",
        Resolution::Fuzzy(_) => "similarity",
        Resolution::NotFound => "none",
    };
    let matched = resolution.row().and_then(|row| rec.details(row, None));

    let filters = Filters::from_params(params.genre.as_deref(), params.year_min.as_deref(), params.year_max.as_deref());
    let mut movies: Vec<MovieDetails> = match resolution.row() {
        Some(row) => rec
            .similar_to_row(row, clamp_k(params.k))
            .into_iter()
            .filter_map(|r| rec.details(r.row, Some(r.score)))
            .filter(|m| filters.matches(m))
            .collect(),
        None => Vec::new(),
    };
    sort_movies(&mut movies, SortOrder::parse(params.sort.as_deref()), true, |m| m);

    let results = with_posters(state.posters.as_ref(), movies).await;
    Json(SimilarResponse { title, matched_by, matched, took_s: start.elapsed().as_secs_f64(), results })
}

pub async fn autocomplete_handler(State(state): State<AppState>, Query(params): Query<AutocompleteParams>) -> Json<serde_json::Value> {
    let results = state.recommender.autocomplete(params.prefix.trim(), AUTOCOMPLETE_LIMIT);
    Json(serde_json::json!({ "results": results }))
}

pub async fn genres_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "genres": state.recommender.genres() }))
}

pub async fn mood_handler(State(state): State<AppState>, Query(params): Query<MoodParams>) -> ApiResult<Json<MoodResponse>> {
    if params.level > 100 {
        return Err(ApiError::InvalidInput(format!("level must be between 0 and 100, got {}", params.level)));
    }
    let mood = Mood::for_level(params.level);
    let query = mood.query();
    let movies: Vec<MovieDetails> = state
        .recommender
        .search_scored(&query, clamp_k(params.k))
        .iter()
        .filter_map(|h| state.recommender.details(h.row, Some(h.score)))
        .collect();
    let results = with_posters(state.posters.as_ref(), movies).await;
    Ok(Json(MoodResponse { level: params.level, label: mood.label, query, results }))
}

pub async fn movie_handler(State(state): State<AppState>, Path(movie_id): Path<MovieId>) -> ApiResult<Json<MovieCard>> {
    let (row, _) = state
        .recommender
        .movie_by_id(movie_id)
        .ok_or_else(|| ApiError::NotFound(format!("movie {movie_id}")))?;
    let movie = state
        .recommender
        .details(row, None)
        .ok_or_else(|| ApiError::NotFound(format!("movie {movie_id}")))?;
    let poster = state.posters.poster(&movie.title).await;
    Ok(Json(MovieCard { movie, poster }))
}
