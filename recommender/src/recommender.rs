use crate::corpus::{Corpus, MovieId, MovieRecord, Year};
use crate::error::ConfigError;
use crate::index::DocumentMatrix;
use crate::load::load_path;
use crate::similarity::{rank_against, rank_many, Ranked};
use crate::titles::TitleIndex;
use crate::vectorizer::{Vectorizer, VectorizerConfig};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// How a title was mapped onto a corpus row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Case-insensitive exact title match.
    Exact(usize),
    /// No exact match; the closest row by content similarity to the title text.
    Fuzzy(usize),
    NotFound,
}

impl Resolution {
    pub fn row(self) -> Option<usize> {
        match self {
            Resolution::Exact(row) | Resolution::Fuzzy(row) => Some(row),
            Resolution::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub movie_id: MovieId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredHit {
    pub row: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

/// Movie fields returned to callers, optionally with the similarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    pub overview: String,
    pub director: String,
    pub year: Year,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl MovieDetails {
    pub fn from_record(record: &MovieRecord, score: Option<f32>) -> Self {
        Self {
            movie_id: record.movie_id,
            title: record.title.clone(),
            genres: record.genres.clone(),
            overview: record.overview.clone(),
            director: record.director.clone(),
            year: record.year_value(),
            score,
        }
    }
}

/// Content-based recommender. Fitted once; every query afterwards is read-only.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Corpus,
    vectorizer: Vectorizer,
    matrix: DocumentMatrix,
    titles: TitleIndex,
}

impl Recommender {
    pub fn new(corpus: Corpus, config: VectorizerConfig) -> Result<Self, ConfigError> {
        let start = Instant::now();
        let (vectorizer, matrix) = Vectorizer::fit_transform(corpus.combined_texts(), config)?;
        let titles = TitleIndex::build(corpus.records());
        tracing::info!(
            movies = corpus.len(),
            vocabulary = vectorizer.vocabulary_len(),
            took_s = start.elapsed().as_secs_f64(),
            "recommender ready"
        );
        Ok(Self { corpus, vectorizer, matrix, titles })
    }

    /// Load a corpus file (or directory) and fit on it.
    pub fn from_path<P: AsRef<Path>>(path: P, config: VectorizerConfig) -> anyhow::Result<Self> {
        let corpus = load_path(path)?;
        Ok(Self::new(corpus, config)?)
    }

    fn rank_text(&self, text: &str, k: usize) -> Vec<Ranked> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        rank_against(&self.matrix, &self.vectorizer.transform(text), k, None)
    }

    fn scored_hit(&self, r: Ranked) -> ScoredHit {
        let record = &self.corpus.records()[r.row];
        ScoredHit { row: r.row, movie_id: record.movie_id, title: record.title.clone(), score: r.score }
    }

    /// Top `k` movies for a free-text query. A blank query yields nothing.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        self.search_scored(query, k)
            .into_iter()
            .map(|h| SearchHit { movie_id: h.movie_id, title: h.title })
            .collect()
    }

    pub fn search_scored(&self, query: &str, k: usize) -> Vec<ScoredHit> {
        self.rank_text(query, k).into_iter().map(|r| self.scored_hit(r)).collect()
    }

    /// [`search`](Self::search) for several queries at once, results in query order.
    pub fn search_batch<S: AsRef<str>>(&self, queries: &[S], k: usize) -> Vec<Vec<SearchHit>> {
        let live: Vec<usize> = (0..queries.len()).filter(|&i| !queries[i].as_ref().trim().is_empty()).collect();
        let vectors: Vec<_> = live.iter().map(|&i| self.vectorizer.transform(queries[i].as_ref())).collect();
        let mut out: Vec<Vec<SearchHit>> = vec![Vec::new(); queries.len()];
        for (i, hits) in live.into_iter().zip(rank_many(&self.matrix, &vectors, k)) {
            out[i] = hits
                .into_iter()
                .map(|r| {
                    let h = self.scored_hit(r);
                    SearchHit { movie_id: h.movie_id, title: h.title }
                })
                .collect();
        }
        out
    }

    /// Exact, case-insensitive title lookup only.
    pub fn resolve_exact(&self, title: &str) -> Option<usize> {
        self.titles.resolve_exact(title)
    }

    /// Exact lookup, falling back to the single closest row by content similarity.
    pub fn resolve(&self, title: &str) -> Resolution {
        if title.is_empty() {
            return Resolution::NotFound;
        }
        if let Some(row) = self.resolve_exact(title) {
            tracing::debug!(title, row, "resolved title exactly");
            return Resolution::Exact(row);
        }
        match self.rank_text(title, 1).first() {
            Some(best) => {
                tracing::debug!(title, row = best.row, score = best.score, "resolved title by similarity");
                Resolution::Fuzzy(best.row)
            }
            None => Resolution::NotFound,
        }
    }

    /// Movies most similar to `title`, never including the resolved movie itself.
    pub fn recommend_similar(&self, title: &str, k: usize, include_scores: bool) -> Vec<MovieDetails> {
        let Some(row) = self.resolve(title).row() else {
            return Vec::new();
        };
        self.similar_to_row(row, k)
            .into_iter()
            .filter_map(|r| self.details(r.row, include_scores.then_some(r.score)))
            .collect()
    }

    /// Rows ranked by similarity to `row`, excluding `row`.
    pub fn similar_to_row(&self, row: usize, k: usize) -> Vec<Ranked> {
        match self.matrix.row(row) {
            Some(vector) => rank_against(&self.matrix, vector, k, Some(row)),
            None => Vec::new(),
        }
    }

    pub fn details(&self, row: usize, score: Option<f32>) -> Option<MovieDetails> {
        self.corpus.get(row).map(|r| MovieDetails::from_record(r, score))
    }

    pub fn movie(&self, row: usize) -> Option<&MovieRecord> {
        self.corpus.get(row)
    }

    /// First row carrying `movie_id`.
    pub fn movie_by_id(&self, movie_id: MovieId) -> Option<(usize, &MovieRecord)> {
        self.corpus.records().iter().enumerate().find(|(_, m)| m.movie_id == movie_id)
    }

    /// Titles starting with `prefix` (case-insensitive), in corpus order.
    pub fn autocomplete(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.titles
            .prefix_matches(prefix, limit)
            .into_iter()
            .filter_map(|row| self.corpus.get(row).map(|m| m.title.clone()))
            .collect()
    }

    pub fn genres(&self) -> Vec<String> { self.corpus.genres() }
    pub fn corpus(&self) -> &Corpus { &self.corpus }
    pub fn vectorizer(&self) -> &Vectorizer { &self.vectorizer }
    pub fn len(&self) -> usize { self.corpus.len() }
    pub fn is_empty(&self) -> bool { self.corpus.is_empty() }
}
