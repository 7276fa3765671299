use recommender::MovieDetails;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Rank order for search; score descending for similar.
    #[default]
    Relevance,
    YearDesc,
    YearAsc,
    Title,
}

impl SortOrder {
    /// Unknown names fall back to relevance.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some("year_desc") => SortOrder::YearDesc,
            Some("year_asc") => SortOrder::YearAsc,
            Some("title") => SortOrder::Title,
            _ => SortOrder::Relevance,
        }
    }
}

/// Post-ranking filters shared by the search and similar endpoints.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub genre: Option<String>,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
}

impl Filters {
    /// Blank genres and non-numeric year bounds are ignored.
    pub fn from_params(genre: Option<&str>, year_min: Option<&str>, year_max: Option<&str>) -> Self {
        Self {
            genre: genre.map(str::trim).filter(|g| !g.is_empty()).map(str::to_string),
            year_min: year_min.and_then(parse_year_bound),
            year_max: year_max.and_then(parse_year_bound),
        }
    }

    pub fn matches(&self, movie: &MovieDetails) -> bool {
        if let Some(genre) = &self.genre {
            if !movie.genres.split('|').any(|g| g == genre) {
                return false;
            }
        }
        if self.year_min.is_none() && self.year_max.is_none() {
            return true;
        }
        match movie.year.as_number() {
            Some(y) => self.year_min.map_or(true, |min| y >= min) && self.year_max.map_or(true, |max| y <= max),
            None => false,
        }
    }
}

fn parse_year_bound(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Stable sort; movies without a numeric year go last for both year orders.
pub fn sort_movies<T>(items: &mut [T], order: SortOrder, by_score: bool, movie: impl Fn(&T) -> &MovieDetails) {
    match order {
        SortOrder::Relevance if by_score => items.sort_by(|a, b| {
            let (sa, sb) = (movie(a).score.unwrap_or(0.0), movie(b).score.unwrap_or(0.0));
            sb.total_cmp(&sa)
        }),
        SortOrder::Relevance => {}
        SortOrder::YearDesc => items.sort_by(|a, b| compare_years(movie(b), movie(a), i64::MIN)),
        SortOrder::YearAsc => items.sort_by(|a, b| compare_years(movie(a), movie(b), i64::MAX)),
        SortOrder::Title => items.sort_by_key(|m| movie(m).title.to_lowercase()),
    }
}

fn compare_years(a: &MovieDetails, b: &MovieDetails, missing: i64) -> Ordering {
    a.year.as_number().unwrap_or(missing).cmp(&b.year.as_number().unwrap_or(missing))
}
