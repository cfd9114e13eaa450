//! Scoring and explanation engine.
//!
//! Turns an intent and a pool of profile records into one ranked, explained
//! [`Recommendation`] per record:
//!
//! 1. One batched oracle call scores every profile's similarity text
//! 2. Each profile gets relevance, opportunity, badge, triggers and text
//! 3. A stable sort ranks by opportunity score, best first
//!
//! The engine holds no mutable state; one instance can serve concurrent
//! requests as long as its oracle can.

pub mod explain;
pub mod normalize;
pub mod scoring;
mod types;

use std::sync::Arc;

use rayon::prelude::*;

use crate::config::ScoringConfig;
use crate::semantic::{OracleError, SimilarityOracle};

pub use normalize::{clean, matched_skills, split_skills};
pub use types::{ProfileRecord, Recommendation, RecommendationReport, Skills, DEFAULT_ROLE};

/// Name shown in the starter when a profile has none.
const ANONYMOUS_NAME: &str = "there";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("similarity oracle failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("similarity oracle returned {got} scores for {expected} profiles")]
    ScoreCountMismatch { expected: usize, got: usize },
}

pub struct RecommendationEngine {
    oracle: Arc<dyn SimilarityOracle>,
    config: ScoringConfig,
}

impl RecommendationEngine {
    pub fn new(oracle: Arc<dyn SimilarityOracle>, config: ScoringConfig) -> Self {
        Self { oracle, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Rank `profiles` against `intent`.
    ///
    /// Returns exactly one recommendation per profile. An oracle failure fails
    /// the whole call; nothing is partially scored.
    pub fn recommend(
        &self,
        intent: &str,
        profiles: &[ProfileRecord],
    ) -> Result<Vec<Recommendation>, EngineError> {
        if profiles.is_empty() {
            log::debug!("no profiles to rank");
            return Ok(Vec::new());
        }

        let texts: Vec<String> = profiles.iter().map(ProfileRecord::similarity_text).collect();
        let similarities = self.oracle.similarities(intent, &texts)?;

        if similarities.len() != profiles.len() {
            return Err(EngineError::ScoreCountMismatch {
                expected: profiles.len(),
                got: similarities.len(),
            });
        }

        let clean_intent = clean(intent);

        let mut recommendations: Vec<Recommendation> = profiles
            .par_iter()
            .zip(similarities.par_iter())
            .map(|(profile, &similarity)| self.annotate(&clean_intent, profile, similarity))
            .collect();

        rank(&mut recommendations);

        log::debug!(
            "ranked {} profiles, top score {:?}",
            recommendations.len(),
            recommendations.first().map(|r| r.opportunity_score)
        );

        Ok(recommendations)
    }

    /// Same as [`recommend`](Self::recommend), wrapped with the data sources
    /// the profiles were loaded from.
    pub fn report(
        &self,
        intent: &str,
        profiles: &[ProfileRecord],
        data_sources: Vec<String>,
    ) -> Result<RecommendationReport, EngineError> {
        Ok(RecommendationReport {
            data_sources,
            recommendations: self.recommend(intent, profiles)?,
        })
    }

    fn annotate(&self, clean_intent: &str, profile: &ProfileRecord, similarity: f32) -> Recommendation {
        let role = profile.role_or_default();
        let source = profile.source_tag();

        let relevance = scoring::relevance_score(similarity);
        let timing = scoring::timing_score(&self.config, profile.recent_activity_score);
        let trust = self.config.trust_multiplier(source);
        let opportunity = scoring::opportunity_score(&self.config, relevance, timing, trust);

        let matched = matched_skills(&split_skills(&profile.skills), clean_intent);

        let signals = explain::Signals {
            role,
            source,
            matched_skills: &matched,
            timing_score: timing,
            opportunity_score: opportunity,
        };

        Recommendation {
            name: profile.name.clone(),
            role: role.to_string(),
            opportunity_score: opportunity,
            relevance_score: relevance,
            timing_score: timing,
            why: explain::why(&self.config.thresholds, &signals),
            why_now: explain::why_now(&self.config.thresholds, timing, opportunity).to_string(),
            contextual_triggers: explain::contextual_triggers(&self.config, &signals, clean_intent),
            starter: explain::starter(profile.name.as_deref().unwrap_or(ANONYMOUS_NAME), role),
            profile_url: profile.profile_url.clone().unwrap_or_default(),
            source: source.map(str::to_string),
            matched_skills: matched,
        }
    }
}

/// Stable sort, highest opportunity score first.
pub fn rank(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));
}
