//! Relevance and opportunity scores.
//!
//! ```text
//! relevance   = round2(cosine * 100)
//! opportunity = round2(min((w_r * relevance + w_t * timing) * trust, max_score))
//! ```
//!
//! The opportunity score is clamped only from above. A negative relevance
//! can produce a negative opportunity score.

use crate::config::ScoringConfig;

/// Round to two decimals. Negative zero becomes `0.0`.
///
/// Rounds the exact binary value, so `2.675` (stored as `2.67499…`) gives
/// `2.67`.
pub fn round2(value: f64) -> f64 {
    let rounded = format!("{value:.2}").parse::<f64>().unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Scale an oracle similarity to the 0–100 relevance range.
///
/// Non-finite similarities are treated as no signal.
pub fn relevance_score(similarity: f32) -> f64 {
    let similarity = f64::from(similarity);
    if !similarity.is_finite() {
        log::warn!("similarity oracle returned non-finite score {similarity}, using 0");
        return 0.0;
    }
    round2(similarity * 100.0)
}

/// The profile's activity score, or the configured default when it is
/// missing or non-finite.
pub fn timing_score(config: &ScoringConfig, recent_activity: Option<f64>) -> f64 {
    match recent_activity {
        Some(timing) if timing.is_finite() => timing,
        Some(timing) => {
            log::warn!(
                "non-finite recent_activity_score {timing}, using {}",
                config.default_timing_score
            );
            config.default_timing_score
        }
        None => config.default_timing_score,
    }
}

/// Combine relevance, timing and source trust into the ranking key.
pub fn opportunity_score(config: &ScoringConfig, relevance: f64, timing: f64, trust: f64) -> f64 {
    let raw =
        (config.relevance_weight * relevance + config.timing_weight * timing) * trust;
    round2(raw.min(config.max_score))
}
