use serde::{Deserialize, Serialize};

use super::MovieId;

/// A ranked candidate before poster enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    /// Position in the catalog (and row/column of the similarity matrix)
    pub index: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

/// One recommendation card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub title: String,
    /// Absent when the metadata service has no poster or could not be reached
    pub poster_url: Option<String>,
}
