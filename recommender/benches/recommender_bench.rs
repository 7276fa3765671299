use criterion::{criterion_group, criterion_main, Criterion};
use recommender::tokenizer::tokenize;
use recommender::{Corpus, MovieRecord, Recommender, VectorizerConfig};

const OVERVIEWS: [&str; 4] = [
    "a thief who steals corporate secrets through the use of dream-sharing technology",
    "a computer hacker learns from mysterious rebels about the true nature of his reality",
    "a seventeen-year-old aristocrat falls in love with a kind but poor artist aboard the ship",
    "a team of explorers travel through a wormhole in space to ensure humanity's survival",
];

fn synthetic_corpus(n: usize) -> Corpus {
    let records = (0..n)
        .map(|i| MovieRecord {
            movie_id: i as i64,
            title: format!("Movie {i}"),
            overview: OVERVIEWS[i % OVERVIEWS.len()].to_string(),
            genres: ["Sci-Fi|Thriller", "Romance|Drama", "Action"][i % 3].to_string(),
            cast: format!("Actor{} Actor{}", i % 17, i % 23),
            director: format!("Director{}", i % 11),
            year: (1950 + i % 70).to_string(),
        })
        .collect();
    Corpus::from_records(records)
}

fn bench_tokenize(c: &mut Criterion) {
    let text = OVERVIEWS.join(" ");
    c.bench_function("tokenize_overviews", |b| b.iter(|| tokenize(&text)));
}

fn bench_fit_and_query(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000);
    c.bench_function("fit_2000", |b| b.iter(|| Recommender::new(corpus.clone(), VectorizerConfig::default())));
    let rec = Recommender::new(corpus, VectorizerConfig::default()).expect("default config is valid");
    c.bench_function("search_2000", |b| b.iter(|| rec.search("dream thief thriller", 10)));
    c.bench_function("similar_2000", |b| b.iter(|| rec.recommend_similar("Movie 42", 10, true)));
}

criterion_group!(benches, bench_tokenize, bench_fit_and_query);
criterion_main!(benches);
