use serde::Deserialize;

mod movie;
mod recommendation;

pub use movie::{display_title, MovieId, MovieRecord, RawMovie};
pub use recommendation::{RecommendationResult, ScoredMovie};

// ============================================================================
// TMDB API Models
// ============================================================================

/// Subset of TMDB's `/movie/{id}` response used for posters
#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
