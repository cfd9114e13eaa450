//! Semantic similarity infrastructure for intent matching.
//!
//! This module provides local text similarity using fastembed-rs for
//! generating embeddings and cosine similarity to compare them.
//!
//! # Architecture
//!
//! - `embeddings`: Wraps fastembed for embedding generation
//! - `similarity`: Cosine similarity over embedding vectors
//! - `oracle`: The `SimilarityOracle` seam the engine scores through

pub mod embeddings;
mod oracle;
mod similarity;

pub use embeddings::{EmbeddingError, EmbeddingModel};
pub use oracle::{OracleError, SemanticOracle, SimilarityOracle};
pub use similarity::{cosine_similarity, l2_norm};
