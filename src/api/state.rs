use std::sync::Arc;

use crate::{
    catalog::Catalog,
    services::{PosterResolver, Recommender},
};

/// Shared application state
///
/// Everything here is read-only after startup except the poster memo cache,
/// which is internally synchronized.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Recommender,
    /// Number of cards rendered when the client does not ask for a count
    pub recommendation_count: usize,
    /// Largest count a client may request
    pub max_recommendation_count: usize,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        posters: PosterResolver,
        recommendation_count: usize,
        max_recommendation_count: usize,
    ) -> Self {
        Self {
            recommender: Recommender::new(Arc::clone(&catalog), posters),
            catalog,
            recommendation_count,
            max_recommendation_count,
        }
    }
}
