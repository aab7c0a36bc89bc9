use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{RecommendationResult, ScoredMovie},
    services::posters::PosterResolver,
};

/// Ranks a similarity row by descending score
///
/// The sort is stable, so equal scores keep catalog order (lower index first).
pub fn rank_row(row: &[f32]) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

/// Finds the movies most similar to a selected title
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    posters: PosterResolver,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, posters: PosterResolver) -> Self {
        Self { catalog, posters }
    }

    /// Top `n` candidates for `title`, without posters
    ///
    /// The highest ranked entry is taken to be the movie itself and skipped.
    pub fn ranked(&self, title: &str, n: usize) -> AppResult<Vec<ScoredMovie>> {
        let index = self
            .catalog
            .index_of(title)
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' not found in catalog", title)))?;

        let row = self.catalog.similarity_row(index).ok_or_else(|| {
            AppError::Internal(format!("No similarity row for catalog index {}", index))
        })?;

        let ranked = rank_row(row);

        // Assumes self-similarity is the row maximum; only reported when it isn't.
        if let Some(&(skipped, score)) = ranked.first() {
            if skipped != index {
                tracing::warn!(
                    title = %title,
                    index,
                    skipped_index = skipped,
                    score,
                    "Top ranked entry is not the selected movie"
                );
            }
        }

        ranked
            .into_iter()
            .skip(1)
            .take(n)
            .map(|(i, score)| {
                let movie = self.catalog.movie(i).ok_or_else(|| {
                    AppError::Internal(format!("Similarity column {} outside catalog", i))
                })?;
                Ok(ScoredMovie {
                    index: i,
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    score,
                })
            })
            .collect()
    }

    /// Top `n` recommendations for `title`, each with its poster if available
    pub async fn recommend(&self, title: &str, n: usize) -> AppResult<Vec<RecommendationResult>> {
        let candidates = self.ranked(title, n)?;

        let posters = self
            .posters
            .resolve_many(candidates.iter().map(|c| c.movie_id).collect())
            .await;

        let results: Vec<RecommendationResult> = candidates
            .into_iter()
            .zip(posters)
            .map(|(candidate, poster_url)| RecommendationResult {
                title: candidate.title,
                poster_url,
            })
            .collect();

        tracing::info!(
            title = %title,
            requested = n,
            returned = results.len(),
            with_poster = results.iter().filter(|r| r.poster_url.is_some()).count(),
            "Recommendations computed"
        );

        Ok(results)
    }
}
