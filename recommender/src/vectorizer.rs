//! TF-IDF vector space model over unigrams and bigrams.
//!
//! Weights are `tf * idf`, where `idf = ln((1 + n) / (1 + df)) + 1` by default
//! (or `ln(n / df) + 1` without smoothing), and every vector is L2-normalized so a
//! plain dot product is the cosine similarity.

use crate::error::ConfigError;
use crate::index::{DocumentMatrix, SparseVector, TermId};
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use std::collections::{BTreeMap, HashMap};

/// Default vocabulary cap.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Keep at most this many terms; `None` keeps all.
    pub max_features: Option<usize>,
    pub tokenizer: TokenizerConfig,
    pub smooth_idf: bool,
    /// Use `1 + ln(tf)` instead of the raw count.
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: Some(DEFAULT_MAX_FEATURES),
            tokenizer: TokenizerConfig::default(),
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

/// Fitted vocabulary and document-frequency statistics. Immutable once built.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    tokenizer: Tokenizer,
    vocabulary: HashMap<String, TermId>,
    terms: Vec<String>,
    idf: Vec<f32>,
    num_docs: usize,
    sublinear_tf: bool,
}

impl Vectorizer {
    pub fn fit<S: AsRef<str>>(texts: &[S], config: VectorizerConfig) -> Result<Self, ConfigError> {
        Self::fit_transform(texts, config).map(|(v, _)| v)
    }

    /// Fit on `texts` and return the weighted matrix of the same texts.
    pub fn fit_transform<S: AsRef<str>>(texts: &[S], config: VectorizerConfig) -> Result<(Self, DocumentMatrix), ConfigError> {
        if config.max_features == Some(0) {
            return Err(ConfigError::ZeroMaxFeatures);
        }
        let tokenizer = Tokenizer::new(config.tokenizer)?;
        let analyzed: Vec<Vec<String>> = texts.iter().map(|t| tokenizer.analyze(t.as_ref())).collect();
        let n = analyzed.len();

        // Corpus statistics per term: (document frequency, total occurrences)
        let mut stats: HashMap<&str, (u32, u64)> = HashMap::new();
        for grams in &analyzed {
            let mut counts: HashMap<&str, u64> = HashMap::new();
            for g in grams {
                *counts.entry(g.as_str()).or_insert(0) += 1;
            }
            for (g, c) in counts {
                let entry = stats.entry(g).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += c;
            }
        }

        let idf_of = |df: u32| idf(n, df, config.smooth_idf);
        let mut ranked: Vec<(&str, f64)> = stats
            .iter()
            .map(|(term, &(df, total))| (*term, total as f64 * idf_of(df) as f64))
            .collect();
        if let Some(max) = config.max_features {
            if ranked.len() > max {
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                ranked.truncate(max);
            }
        }

        let mut kept: Vec<&str> = ranked.into_iter().map(|(t, _)| t).collect();
        kept.sort_unstable();
        let terms: Vec<String> = kept.iter().map(|t| t.to_string()).collect();
        let vocabulary: HashMap<String, TermId> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as TermId))
            .collect();
        let idf: Vec<f32> = kept.iter().map(|t| idf_of(stats[t].0)).collect();

        let vectorizer = Self { tokenizer, vocabulary, terms, idf, num_docs: n, sublinear_tf: config.sublinear_tf };
        let rows = analyzed.iter().map(|grams| vectorizer.weigh(grams)).collect();
        let matrix = DocumentMatrix::new(rows, vectorizer.terms.len());
        tracing::debug!(docs = n, candidates = stats.len(), vocabulary = vectorizer.terms.len(), "fitted vocabulary");
        Ok((vectorizer, matrix))
    }

    /// Map `text` into the fitted space. Terms outside the vocabulary are dropped.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&self.tokenizer.analyze(text))
    }

    fn weigh(&self, grams: &[String]) -> SparseVector {
        let mut counts: BTreeMap<TermId, u32> = BTreeMap::new();
        for g in grams {
            if let Some(&tid) = self.vocabulary.get(g) {
                *counts.entry(tid).or_insert(0) += 1;
            }
        }
        let entries = counts
            .into_iter()
            .map(|(tid, tf_raw)| {
                let tf = if self.sublinear_tf { 1.0 + (tf_raw as f32).ln() } else { tf_raw as f32 };
                (tid, tf * self.idf[tid as usize])
            })
            .collect();
        SparseVector::normalized(entries)
    }

    pub fn vocabulary_len(&self) -> usize { self.terms.len() }
    pub fn num_docs(&self) -> usize { self.num_docs }
    pub fn dimension_of(&self, term: &str) -> Option<TermId> { self.vocabulary.get(term).copied() }
    pub fn term(&self, dim: TermId) -> Option<&str> { self.terms.get(dim as usize).map(String::as_str) }
    pub fn idf(&self, dim: TermId) -> Option<f32> { self.idf.get(dim as usize).copied() }
}

fn idf(n: usize, df: u32, smooth: bool) -> f32 {
    let (n, df) = (n as f32, df.max(1) as f32);
    if smooth { ((1.0 + n) / (1.0 + df)).ln() + 1.0 } else { (n / df).ln() + 1.0 }
}
