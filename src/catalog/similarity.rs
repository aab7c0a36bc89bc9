//! Precomputed pairwise similarity matrix
//!
//! Binary layout (little-endian):
//!
//! ```text
//! b"SIMX" | dimension: u32 | dimension * dimension scores: f32, row-major
//! ```
//!
//! A `.json` file holding an array of rows is accepted as well.

use std::path::Path;

use crate::error::CatalogError;

const MAGIC: &[u8; 4] = b"SIMX";
const HEADER_LEN: usize = 8;

/// Square matrix of similarity scores
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds a matrix from its rows, rejecting ragged or non-finite input
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, CatalogError> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(CatalogError::Format(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    dimension
                )));
            }
            scores.extend(row);
        }

        Self::from_flat(dimension, scores)
    }

    fn from_flat(dimension: usize, scores: Vec<f32>) -> Result<Self, CatalogError> {
        if let Some(pos) = scores.iter().position(|s| !s.is_finite()) {
            return Err(CatalogError::Format(format!(
                "non-finite score at row {}, column {}",
                pos / dimension,
                pos % dimension
            )));
        }

        Ok(Self { dimension, scores })
    }

    /// Decodes the binary artifact
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CatalogError> {
        if bytes.len() < HEADER_LEN || &bytes[..4] != MAGIC {
            return Err(CatalogError::Format("missing SIMX header".to_string()));
        }

        let mut dim_bytes = [0u8; 4];
        dim_bytes.copy_from_slice(&bytes[4..HEADER_LEN]);
        let dimension = u32::from_le_bytes(dim_bytes) as usize;

        let expected = dimension
            .checked_mul(dimension)
            .and_then(|cells| cells.checked_mul(4))
            .and_then(|body| body.checked_add(HEADER_LEN))
            .ok_or_else(|| CatalogError::Format(format!("dimension {} too large", dimension)))?;

        if bytes.len() != expected {
            return Err(CatalogError::Format(format!(
                "expected {} bytes for dimension {}, found {}",
                expected,
                dimension,
                bytes.len()
            )));
        }

        let scores = bytes[HEADER_LEN..]
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Self::from_flat(dimension, scores)
    }

    /// Encodes the matrix in the binary artifact layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.scores.len() * 4);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&(self.dimension as u32).to_le_bytes());
        for score in &self.scores {
            out.extend_from_slice(&score.to_le_bytes());
        }
        out
    }

    /// Reads a matrix from disk, choosing the format by file extension
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let rows: Vec<Vec<f32>> =
                serde_json::from_slice(&bytes).map_err(|source| CatalogError::Json {
                    path: path.display().to_string(),
                    source,
                })?;
            Self::from_rows(rows)
        } else {
            Self::from_bytes(&bytes)
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Scores of `index` against every movie, or `None` when out of range
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.dimension {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }
}
