use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub type MovieId = i64;

/// Separator between tags in the `genres` field.
pub const GENRE_SEPARATOR: char = '|';

/// A loosely typed tabular cell as it comes out of CSV or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Int(i) => write!(f, "{i}"),
            // Integral floats (a year column with blanks, say) render without the ".0".
            Cell::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", *x as i64),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// One input row before validation. Only `movie_id` and `title` are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    #[serde(default)]
    pub movie_id: Option<Cell>,
    #[serde(default)]
    pub title: Option<Cell>,
    #[serde(default)]
    pub overview: Option<Cell>,
    #[serde(default)]
    pub genres: Option<Cell>,
    #[serde(default)]
    pub cast: Option<Cell>,
    #[serde(default)]
    pub director: Option<Cell>,
    #[serde(default)]
    pub year: Option<Cell>,
}

/// A validated corpus row. Missing optional fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub movie_id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: String,
    pub cast: String,
    pub director: String,
    pub year: String,
}

impl MovieRecord {
    /// Title, overview, genres, cast, director and year joined by single spaces.
    pub fn combined_text(&self) -> String {
        [&self.title, &self.overview, &self.genres, &self.cast, &self.director, &self.year]
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn year_value(&self) -> Year {
        Year::parse(&self.year)
    }

    pub fn genre_tags(&self) -> impl Iterator<Item = &str> {
        self.genres.split(GENRE_SEPARATOR).map(str::trim).filter(|g| !g.is_empty())
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.split(GENRE_SEPARATOR).any(|g| g == genre)
    }
}

/// Release year: a number when the text is all digits, otherwise the text as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Numeric(i64),
    Text(String),
}

impl Year {
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse() {
                return Year::Numeric(n);
            }
        }
        Year::Text(raw.to_string())
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Year::Numeric(n) => Some(*n),
            Year::Text(_) => None,
        }
    }
}

impl RawMovie {
    fn into_record(self, row: usize) -> Result<MovieRecord, LoadError> {
        let movie_id = match self.movie_id {
            None => return Err(LoadError::MissingField { row, field: "movie_id" }),
            Some(cell) => parse_movie_id(cell, row)?,
        };
        let title = match self.title {
            None => return Err(LoadError::MissingField { row, field: "title" }),
            Some(cell) => cell.to_string(),
        };
        Ok(MovieRecord {
            movie_id,
            title,
            overview: text_or_empty(self.overview),
            genres: text_or_empty(self.genres),
            cast: text_or_empty(self.cast),
            director: text_or_empty(self.director),
            year: text_or_empty(self.year),
        })
    }
}

fn parse_movie_id(cell: Cell, row: usize) -> Result<MovieId, LoadError> {
    let invalid = |value: String| LoadError::InvalidField { row, field: "movie_id", value };
    match cell {
        Cell::Int(i) => Ok(i),
        Cell::Float(x) if x.is_finite() && x.fract() == 0.0 => Ok(x as i64),
        Cell::Text(s) => s.trim().parse().map_err(|_| invalid(s)),
        other => Err(invalid(other.to_string())),
    }
}

fn text_or_empty(cell: Option<Cell>) -> String {
    cell.map(|c| c.to_string()).unwrap_or_default()
}

/// Validated records plus their combined text, in identical row order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<MovieRecord>,
    combined: Vec<String>,
}

impl Corpus {
    pub fn build(raw: Vec<RawMovie>) -> Result<Self, LoadError> {
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(row, movie)| movie.into_record(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let combined = records.iter().map(MovieRecord::combined_text).collect();
        Self { records, combined }
    }

    pub fn records(&self) -> &[MovieRecord] { &self.records }
    pub fn combined_texts(&self) -> &[String] { &self.combined }
    pub fn get(&self, row: usize) -> Option<&MovieRecord> { self.records.get(row) }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Every distinct genre tag, sorted.
    pub fn genres(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self.records.iter().flat_map(MovieRecord::genre_tags).collect();
        tags.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Cell, title: &str) -> RawMovie {
        RawMovie { movie_id: Some(id), title: Some(Cell::Text(title.into())), ..RawMovie::default() }
    }

    #[test]
    fn combines_fields_with_empty_defaults() {
        let mut m = raw(Cell::Int(1), "Inception");
        m.overview = Some(Cell::Text("dreams".into()));
        m.year = Some(Cell::Int(2010));
        let corpus = Corpus::build(vec![m]).unwrap();
        assert_eq!(corpus.combined_texts()[0], "Inception dreams    2010");
        assert_eq!(corpus.records()[0].cast, "");
    }

    #[test]
    fn required_fields_are_enforced() {
        let missing_title = RawMovie { movie_id: Some(Cell::Int(3)), ..RawMovie::default() };
        let err = Corpus::build(vec![raw(Cell::Int(1), "ok"), missing_title]).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { row: 1, field: "title" }));

        let missing_id = RawMovie { title: Some(Cell::Text("x".into())), ..RawMovie::default() };
        assert!(matches!(Corpus::build(vec![missing_id]), Err(LoadError::MissingField { field: "movie_id", .. })));
    }

    #[test]
    fn movie_id_accepts_numeric_text() {
        let corpus = Corpus::build(vec![raw(Cell::Text(" 42 ".into()), "a"), raw(Cell::Float(7.0), "b")]).unwrap();
        assert_eq!(corpus.records()[0].movie_id, 42);
        assert_eq!(corpus.records()[1].movie_id, 7);
        assert!(Corpus::build(vec![raw(Cell::Text("abc".into()), "a")]).is_err());
    }

    #[test]
    fn year_falls_back_to_text() {
        assert_eq!(Year::parse("1999"), Year::Numeric(1999));
        assert_eq!(Year::parse("circa 1999"), Year::Text("circa 1999".into()));
        assert_eq!(Year::parse(""), Year::Text(String::new()));
        assert_eq!(Cell::Float(1997.0).to_string(), "1997");
    }

    #[test]
    fn genres_are_sorted_and_unique() {
        let mut a = raw(Cell::Int(1), "a");
        a.genres = Some(Cell::Text("Sci-Fi|Thriller".into()));
        let mut b = raw(Cell::Int(2), "b");
        b.genres = Some(Cell::Text("Action| Sci-Fi||".into()));
        let corpus = Corpus::build(vec![a, b]).unwrap();
        assert_eq!(corpus.genres(), vec!["Action", "Sci-Fi", "Thriller"]);
    }
}
