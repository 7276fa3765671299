use crate::corpus::MovieRecord;
use std::collections::HashMap;

/// Case-insensitive title lookup.
///
/// When two movies share a lowercased title the later row wins and the earlier
/// one is reachable only through content-similarity resolution.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    by_title: HashMap<String, usize>,
    lowered: Vec<String>,
}

impl TitleIndex {
    pub fn build(records: &[MovieRecord]) -> Self {
        let mut by_title = HashMap::with_capacity(records.len());
        let mut lowered = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let key = record.title.to_lowercase();
            if let Some(previous) = by_title.insert(key.clone(), row) {
                tracing::debug!(title = %record.title, previous, row, "title collision, later row wins");
            }
            lowered.push(key);
        }
        Self { by_title, lowered }
    }

    pub fn resolve_exact(&self, title: &str) -> Option<usize> {
        self.by_title.get(&title.to_lowercase()).copied()
    }

    /// Rows (in corpus order) whose title starts with `prefix`, ignoring case.
    pub fn prefix_matches(&self, prefix: &str, limit: usize) -> Vec<usize> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.lowered
            .iter()
            .enumerate()
            .filter(|(_, t)| t.starts_with(&prefix))
            .map(|(row, _)| row)
            .take(limit)
            .collect()
    }

    /// Number of distinct lowercased titles.
    pub fn len(&self) -> usize { self.by_title.len() }
    pub fn is_empty(&self) -> bool { self.by_title.is_empty() }
}
