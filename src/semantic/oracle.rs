//! Text-similarity oracle backed by an embedding model.
//!
//! The engine only sees [`SimilarityOracle`]; production code hands it a
//! [`SemanticOracle`], which loads the embedding model once on first use and
//! shares it read-only afterwards.

use std::path::PathBuf;

use once_cell::sync::OnceCell;

use crate::config::SemanticConfig;
use crate::semantic::embeddings::{EmbeddingError, EmbeddingModel};
use crate::semantic::similarity::cosine_similarity;

/// Errors that can occur while scoring text similarity.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Expected {expected} embeddings, got {got}")]
    MissingEmbeddings { expected: usize, got: usize },
}

/// Compares a query against a batch of texts.
///
/// Must return exactly one similarity per candidate, in candidate order, and
/// be deterministic for identical inputs within a process.
pub trait SimilarityOracle: Send + Sync {
    fn similarities(&self, query: &str, candidates: &[String]) -> Result<Vec<f32>, OracleError>;
}

impl SimilarityOracle for EmbeddingModel {
    fn similarities(&self, query: &str, candidates: &[String]) -> Result<Vec<f32>, OracleError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embed(query)?;
        let embeddings = self.embed_batch(candidates)?;

        if embeddings.len() != candidates.len() {
            return Err(OracleError::MissingEmbeddings {
                expected: candidates.len(),
                got: embeddings.len(),
            });
        }

        embeddings
            .iter()
            .map(|embedding| {
                if embedding.len() != query_embedding.len() {
                    return Err(OracleError::DimensionMismatch {
                        expected: query_embedding.len(),
                        got: embedding.len(),
                    });
                }
                Ok(cosine_similarity(&query_embedding, embedding))
            })
            .collect()
    }
}

/// Lazily-loaded embedding oracle.
///
/// Construct once per process and share it (e.g. behind an `Arc`); the model
/// is downloaded and loaded on the first similarity request.
pub struct SemanticOracle {
    config: SemanticConfig,
    cache_dir: PathBuf,
    model: OnceCell<EmbeddingModel>,
}

impl SemanticOracle {
    /// `cache_dir` receives a `models/` subdirectory with downloaded weights.
    pub fn new(config: SemanticConfig, cache_dir: PathBuf) -> Self {
        Self {
            config,
            cache_dir,
            model: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Force the model load. Normally this happens on first use.
    pub fn model(&self) -> Result<&EmbeddingModel, EmbeddingError> {
        self.model.get_or_try_init(|| {
            log::info!("loading embedding model {}", self.config.model);
            let model = EmbeddingModel::new(
                &self.config.model,
                self.cache_dir.clone(),
                self.config.show_download_progress,
            )?;
            log::debug!(
                "embedding model {} ready ({} dimensions)",
                model.name(),
                model.dimensions()
            );
            Ok(model)
        })
    }
}

impl SimilarityOracle for SemanticOracle {
    fn similarities(&self, query: &str, candidates: &[String]) -> Result<Vec<f32>, OracleError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        self.model()?.similarities(query, candidates)
    }
}
