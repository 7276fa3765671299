//! Poster lookup port. The recommender never calls this; handlers enrich results with it.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

#[async_trait]
pub trait PosterSource: Send + Sync {
    /// Poster image URL for `title`, if one is known.
    async fn poster(&self, title: &str) -> Option<String>;
}

/// Used when no poster API is configured.
pub struct NoPosters;

#[async_trait]
impl PosterSource for NoPosters {
    async fn poster(&self, _title: &str) -> Option<String> { None }
}

const OMDB_ENDPOINT: &str = "https://www.omdbapi.com/";

pub struct OmdbPosters {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl OmdbPosters {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(5)).build()?;
        Ok(Self { client, api_key, endpoint: OMDB_ENDPOINT.to_string() })
    }

    async fn fetch(&self, title: &str) -> reqwest::Result<Option<String>> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body: OmdbResponse = resp.json().await?;
        Ok(body.poster.filter(|p| !p.is_empty() && p != "N/A"))
    }
}

#[async_trait]
impl PosterSource for OmdbPosters {
    async fn poster(&self, title: &str) -> Option<String> {
        if title.is_empty() {
            return None;
        }
        match self.fetch(title).await {
            Ok(poster) => poster,
            Err(err) => {
                tracing::warn!(title, error = %err, "poster lookup failed");
                None
            }
        }
    }
}

struct CacheState {
    entries: HashMap<String, Option<String>>,
    order: VecDeque<String>,
}

/// Bounded memo over another source; oldest entries are evicted first.
/// Misses are cached too, so an unknown title is looked up once.
pub struct CachedPosters<S> {
    inner: S,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl<S: PosterSource> CachedPosters<S> {
    pub fn new(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            state: Mutex::new(CacheState { entries: HashMap::new(), order: VecDeque::new() }),
        }
    }

    pub fn len(&self) -> usize { self.state.lock().entries.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[async_trait]
impl<S: PosterSource> PosterSource for CachedPosters<S> {
    async fn poster(&self, title: &str) -> Option<String> {
        if let Some(hit) = self.state.lock().entries.get(title) {
            return hit.clone();
        }
        // lock is not held across the lookup
        let poster = self.inner.poster(title).await;
        let mut state = self.state.lock();
        if !state.entries.contains_key(title) {
            if state.entries.len() >= self.capacity {
                if let Some(oldest) = state.order.pop_front() {
                    state.entries.remove(&oldest);
                }
            }
            state.entries.insert(title.to_string(), poster.clone());
            state.order.push_back(title.to_string());
        }
        poster
    }
}
