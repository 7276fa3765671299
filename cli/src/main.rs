use anyhow::Result;
use clap::{Parser, Subcommand};
use recommender::{MovieDetails, Recommender, Resolution, SearchHit, VectorizerConfig, DEFAULT_MAX_FEATURES};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "movierec")]
#[command(about = "Content-based movie search and recommendations", long_about = None)]
struct Cli {
    /// Corpus path: .csv, .json, .jsonl, or a directory of them
    #[arg(long, global = true, default_value = "./data/movies.csv")]
    data: String,
    /// Vocabulary size cap
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_FEATURES)]
    max_features: usize,
    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Movies matching free-text keywords (one result list per query)
    Search {
        #[arg(required = true)]
        queries: Vec<String>,
        #[arg(short, long, default_value_t = 8)]
        k: usize,
    },
    /// Movies similar to a title
    Similar {
        title: String,
        #[arg(short, long, default_value_t = 8)]
        k: usize,
        /// Include similarity scores
        #[arg(long, default_value_t = false)]
        scores: bool,
    },
    /// Show which movie a title resolves to
    Resolve { title: String },
    /// List every genre tag in the corpus
    Genres,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    results: &'a [SearchHit],
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    title: &'a str,
    matched_by: &'static str,
    movie: Option<MovieDetails>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let config = VectorizerConfig { max_features: Some(cli.max_features), ..VectorizerConfig::default() };
    let rec = Recommender::from_path(&cli.data, config)?;

    let out = match &cli.command {
        Commands::Search { queries, k } => {
            let results = rec.search_batch(queries, *k);
            render_search(queries, &results, cli.json)?
        }
        Commands::Similar { title, k, scores } => {
            let recs = rec.recommend_similar(title.trim(), *k, *scores);
            render_similar(title, &recs, cli.json)?
        }
        Commands::Resolve { title } => render_resolve(&rec, title.trim(), cli.json)?,
        Commands::Genres => {
            let genres = rec.genres();
            if cli.json { serde_json::to_string_pretty(&genres)? } else { genres.join("\n") }
        }
    };
    println!("{out}");
    Ok(())
}

fn render_search(queries: &[String], results: &[Vec<SearchHit>], json: bool) -> Result<String> {
    if json {
        let outputs: Vec<SearchOutput> = queries
            .iter()
            .zip(results)
            .map(|(q, r)| SearchOutput { query: q, results: r })
            .collect();
        return Ok(serde_json::to_string_pretty(&outputs)?);
    }
    let mut lines = Vec::new();
    for (q, hits) in queries.iter().zip(results) {
        if queries.len() > 1 {
            lines.push(format!("# {q}"));
        }
        if hits.is_empty() {
            lines.push("(no matches)".to_string());
        }
        for (i, h) in hits.iter().enumerate() {
            lines.push(format!("{:>2}. {} (id: {})", i + 1, h.title, h.movie_id));
        }
    }
    Ok(lines.join("\n"))
}

fn render_similar(title: &str, recs: &[MovieDetails], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(recs)?);
    }
    if recs.is_empty() {
        return Ok(format!("No matches found for {title:?}. Try another title or a keyword search."));
    }
    let mut lines = vec![format!("Because you like: {title}")];
    for r in recs {
        let year = match &r.year {
            recommender::Year::Numeric(y) => y.to_string(),
            recommender::Year::Text(t) => t.clone(),
        };
        let mut line = format!("- {} ({}) [{}]", r.title, year, r.genres);
        if let Some(score) = r.score {
            line.push_str(&format!(" similarity {score:.2}"));
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn render_resolve(rec: &Recommender, title: &str, json: bool) -> Result<String> {
    let resolution = rec.resolve(title);
    let matched_by = match resolution {
        Resolution::Exact(_) => "exact",
        Resolution::Fuzzy(_) => "similarity",
        Resolution::NotFound => "none",
    };
    let movie = resolution.row().and_then(|row| rec.details(row, None));
    if json {
        return Ok(serde_json::to_string_pretty(&ResolveOutput { title, matched_by, movie })?);
    }
    Ok(match movie {
        Some(m) => format!("{} -> {} (id: {}, matched by {matched_by})", title, m.title, m.movie_id),
        None => format!("{title} -> no match"),
    })
}
