use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::{ProfileRecord, Skills};
use crate::semantic::{EmbeddingError, OracleError, SimilarityOracle};

/// Deterministic oracle: a fixed similarity per candidate text, with a
/// fallback for texts it doesn't know. Counts calls so tests can check
/// batching.
pub struct FixedOracle {
    by_text: HashMap<String, f32>,
    fallback: f32,
    truncate_to: Option<usize>,
    calls: AtomicUsize,
}

impl FixedOracle {
    pub fn constant(similarity: f32) -> Self {
        Self {
            by_text: HashMap::new(),
            fallback: similarity,
            truncate_to: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer `similarity` for the profile's similarity text.
    pub fn with(mut self, profile: &ProfileRecord, similarity: f32) -> Self {
        self.by_text.insert(profile.similarity_text(), similarity);
        self
    }

    /// Return only the first `len` scores, to simulate a broken backend.
    pub fn truncated(mut self, len: usize) -> Self {
        self.truncate_to = Some(len);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SimilarityOracle for FixedOracle {
    fn similarities(&self, _query: &str, candidates: &[String]) -> Result<Vec<f32>, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut scores: Vec<f32> = candidates
            .iter()
            .map(|text| self.by_text.get(text).copied().unwrap_or(self.fallback))
            .collect();
        if let Some(len) = self.truncate_to {
            scores.truncate(len);
        }
        Ok(scores)
    }
}

/// Oracle whose backend is always down.
pub struct FailingOracle;

impl SimilarityOracle for FailingOracle {
    fn similarities(&self, _query: &str, _candidates: &[String]) -> Result<Vec<f32>, OracleError> {
        Err(OracleError::Embedding(EmbeddingError::EmbeddingFailed(
            "backend unavailable".to_string(),
        )))
    }
}

pub fn profile(name: &str, role: &str, skills: &str, timing: f64, source: Option<&str>) -> ProfileRecord {
    ProfileRecord {
        name: Some(name.to_string()),
        role: Some(role.to_string()),
        skills: Skills::from(skills),
        industry: Some("Technology".to_string()),
        recent_activity_score: Some(timing),
        source: source.map(str::to_string),
        profile_url: Some(format!("https://example.com/{name}")),
        ..Default::default()
    }
}
