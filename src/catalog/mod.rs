//! Movie catalog and its similarity matrix
//!
//! Both artifacts are produced together offline: the position of a movie in
//! the catalog file is its row and column in the matrix. They are loaded once
//! at startup and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use crate::{
    error::CatalogError,
    models::{MovieId, MovieRecord, RawMovie},
};

mod similarity;

pub use similarity::SimilarityMatrix;

/// Read-only store of movies and pairwise similarity scores
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    /// Display title → first catalog index carrying it
    index: HashMap<String, usize>,
    similarity: SimilarityMatrix,
}

impl Catalog {
    /// Loads the catalog file and the similarity artifact from disk
    pub fn load(movies_path: &Path, similarity_path: &Path) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(movies_path).map_err(|source| CatalogError::Io {
            path: movies_path.display().to_string(),
            source,
        })?;
        let raw: Vec<RawMovie> =
            serde_json::from_slice(&bytes).map_err(|source| CatalogError::Json {
                path: movies_path.display().to_string(),
                source,
            })?;

        let similarity = SimilarityMatrix::load(similarity_path)?;
        let catalog = Self::from_parts(raw.into_iter().map(MovieRecord::from).collect(), similarity)?;

        tracing::info!(
            movies = catalog.len(),
            movies_path = %movies_path.display(),
            similarity_path = %similarity_path.display(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Assembles a catalog, checking that the matrix covers every movie
    pub fn from_parts(
        movies: Vec<MovieRecord>,
        similarity: SimilarityMatrix,
    ) -> Result<Self, CatalogError> {
        if movies.is_empty() {
            return Err(CatalogError::Empty);
        }
        if movies.len() != similarity.dimension() {
            return Err(CatalogError::LengthMismatch {
                movies: movies.len(),
                matrix: similarity.dimension(),
            });
        }

        let mut index = HashMap::with_capacity(movies.len());
        for (i, movie) in movies.iter().enumerate() {
            if index.contains_key(&movie.title) {
                tracing::debug!(title = %movie.title, index = i, "Duplicate display title");
                continue;
            }
            index.insert(movie.title.clone(), i);
        }

        Ok(Self {
            movies,
            index,
            similarity,
        })
    }

    /// Position of a display title in the catalog
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.index.get(title).copied()
    }

    pub fn movie(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Display titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Movie ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.movies.iter().map(|m| m.id)
    }

    pub fn similarity_row(&self, index: usize) -> Option<&[f32]> {
        self.similarity.row(index)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
