//! Fuzzy name search over patients and doctors.
//!
//! Scoring:
//! - Name contains the query (case-insensitive): 1.0
//! - Otherwise: best fuzzy match against the full name and each name token
//!
//! Hits under [`MIN_SCORE`] are dropped.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::{Doctor, Patient, RecordId};
use crate::store::{Record, RecordStore};

/// Lowest score that still counts as a match.
pub const MIN_SCORE: f64 = 0.75;

/// A search result with its match score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<T> {
    pub record: T,
    pub score: f64,
}

/// Score a name against a query, 0.0 to 1.0.
pub fn name_score(name: &str, query: &str) -> f64 {
    let name = name.to_lowercase();
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0.0;
    }
    if name.contains(&query) {
        return 1.0;
    }

    std::iter::once(name.as_str())
        .chain(name.split_whitespace())
        .map(|candidate| fuzzy_match(candidate, &query))
        .fold(0.0, f64::max)
}

fn fuzzy_match(a: &str, b: &str) -> f64 {
    // Jaro-Winkler favours shared prefixes, Levenshtein overall similarity
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);
    jw * 0.6 + lev * 0.4
}

fn rank<'a, T, I>(records: I, name: impl Fn(&T) -> &str, query: &str, limit: usize) -> Vec<SearchHit<T>>
where
    T: Record + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut hits: Vec<SearchHit<T>> = records
        .filter_map(|record| {
            let score = name_score(name(record), query);
            (score >= MIN_SCORE).then(|| SearchHit {
                record: record.clone(),
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.record.id().cmp(&b.record.id()))
    });
    hits.truncate(limit);
    hits
}

impl RecordStore {
    /// Search patients by name, best matches first.
    pub fn search_patients(&self, query: &str, limit: usize) -> Vec<SearchHit<Patient>> {
        rank(self.patients().iter(), |p| p.name.as_str(), query, limit)
    }

    /// Search doctors by name, best matches first.
    pub fn search_doctors(&self, query: &str, limit: usize) -> Vec<SearchHit<Doctor>> {
        rank(self.doctors().iter(), |d| d.name.as_str(), query, limit)
    }
}

/// IDs of the hits, in rank order.
pub fn hit_ids<T: Record>(hits: &[SearchHit<T>]) -> Vec<RecordId> {
    hits.iter().map(|h| h.record.id()).collect()
}
