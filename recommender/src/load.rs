use crate::corpus::{Cell, Corpus, RawMovie};
use crate::error::LoadError;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SUPPORTED: &[&str] = &["csv", "json", "jsonl"];

/// Load a corpus from a `.csv`, `.json` or `.jsonl` file, or from every such file
/// under a directory (visited in path order).
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Corpus, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let raw = if path.is_dir() {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && extension(p).is_some_and(|ext| SUPPORTED.contains(&ext)) {
                files.push(p.to_path_buf());
            }
        }
        let mut raw = Vec::new();
        for file in files {
            raw.extend(read_file(&file)?);
        }
        raw
    } else {
        read_file(path)?
    };
    let corpus = Corpus::build(raw)?;
    tracing::info!(path = %path.display(), movies = corpus.len(), "loaded corpus");
    Ok(corpus)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn read_file(path: &Path) -> Result<Vec<RawMovie>, LoadError> {
    let open = || File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source });
    match extension(path) {
        Some("csv") => read_csv(open()?, path),
        Some("jsonl") => read_jsonl(BufReader::new(open()?), path),
        Some("json") => read_json(BufReader::new(open()?), path),
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// A CSV row read verbatim. CSV cells carry no type, so every cell stays text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvMovie {
    movie_id: Option<String>,
    title: Option<String>,
    overview: Option<String>,
    genres: Option<String>,
    cast: Option<String>,
    director: Option<String>,
    year: Option<String>,
}

impl From<CsvMovie> for RawMovie {
    fn from(row: CsvMovie) -> Self {
        RawMovie {
            movie_id: row.movie_id.map(Cell::Text),
            title: row.title.map(Cell::Text),
            overview: row.overview.map(Cell::Text),
            genres: row.genres.map(Cell::Text),
            cast: row.cast.map(Cell::Text),
            director: row.director.map(Cell::Text),
            year: row.year.map(Cell::Text),
        }
    }
}

/// CSV with a header row; columns beyond the known fields are ignored.
pub fn read_csv<R: Read>(reader: R, origin: &Path) -> Result<Vec<RawMovie>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
    let mut out: Vec<RawMovie> = Vec::new();
    for record in rdr.deserialize::<CsvMovie>() {
        out.push(record.map_err(|e| parse_error(origin, e))?.into());
    }
    Ok(out)
}

/// One JSON object per line; blank lines are skipped.
pub fn read_jsonl<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<RawMovie>, LoadError> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| LoadError::Io { path: origin.to_path_buf(), source })?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line).map_err(|e| parse_error(origin, e))?);
    }
    Ok(out)
}

/// Either an array of objects or a single object.
pub fn read_json<R: Read>(reader: R, origin: &Path) -> Result<Vec<RawMovie>, LoadError> {
    let json: serde_json::Value = serde_json::from_reader(reader).map_err(|e| parse_error(origin, e))?;
    match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(|e| parse_error(origin, e)))
            .collect(),
        serde_json::Value::Object(_) => {
            Ok(vec![serde_json::from_value(json).map_err(|e| parse_error(origin, e))?])
        }
        _ => Err(LoadError::Parse { path: origin.to_path_buf(), message: "expected an object or an array of objects".into() }),
    }
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> LoadError {
    LoadError::Parse { path: path.to_path_buf(), message: err.to_string() }
}
