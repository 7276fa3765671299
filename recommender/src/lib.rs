pub mod corpus;
pub mod error;
pub mod index;
pub mod load;
pub mod recommender;
pub mod similarity;
pub mod titles;
pub mod tokenizer;
pub mod vectorizer;

pub use corpus::{Cell, Corpus, MovieId, MovieRecord, RawMovie, Year};
pub use error::{ConfigError, LoadError};
pub use index::{DocumentMatrix, Posting, SparseVector, TermId};
pub use load::load_path;
pub use recommender::{MovieDetails, Recommender, Resolution, ScoredHit, SearchHit};
pub use similarity::{cosine, rank, Ranked, EXCLUDED_SCORE};
pub use titles::TitleIndex;
pub use tokenizer::{StopWords, Tokenizer, TokenizerConfig};
pub use vectorizer::{Vectorizer, VectorizerConfig, DEFAULT_MAX_FEATURES};
