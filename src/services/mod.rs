pub mod posters;
pub mod recommender;

pub use posters::{PosterProvider, PosterResolver, TmdbProvider};
pub use recommender::Recommender;
