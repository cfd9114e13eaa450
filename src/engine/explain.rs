//! Human-readable justifications for a scored profile.
//!
//! Every string here is a pure function of the scores and profile fields, so
//! the same input always yields the same wording.

use crate::config::{ScoringConfig, Thresholds};
use crate::engine::normalize::clean;

pub const BADGE_ACTIVE: &str = "actively relevant right now";
pub const BADGE_RECENT: &str = "recently active, good time to connect";
pub const BADGE_MODERATE: &str = "moderately active, timing is reasonable";
pub const BADGE_BACKGROUND: &str = "relevant background, explore when ready";

const WHY_LEAD_IN: &str = "This profile is recommended because of ";

/// Scored view of one profile that the explanation pass reads from.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    pub role: &'a str,
    pub source: Option<&'a str>,
    pub matched_skills: &'a [String],
    pub timing_score: f64,
    pub opportunity_score: f64,
}

/// Timing badge; the first matching tier wins.
pub fn why_now(thresholds: &Thresholds, timing: f64, opportunity: f64) -> &'static str {
    if timing >= thresholds.active_timing && opportunity >= thresholds.active_opportunity {
        BADGE_ACTIVE
    } else if timing >= thresholds.recent_timing {
        BADGE_RECENT
    } else if timing >= thresholds.moderate_timing {
        BADGE_MODERATE
    } else {
        BADGE_BACKGROUND
    }
}

/// Short labels for the matching signals, in fixed priority order,
/// truncated to `max_triggers`.
pub fn contextual_triggers(
    config: &ScoringConfig,
    signals: &Signals<'_>,
    clean_intent: &str,
) -> Vec<String> {
    let mut triggers = Vec::new();

    if let Some(skill) = signals.matched_skills.first() {
        triggers.push(format!("overlapping interests in {skill}"));
    }

    if signals.timing_score >= config.thresholds.recent_timing {
        triggers.push("recent professional activity".to_string());
    }

    if clean_intent.contains(&clean(signals.role)) {
        triggers.push("aligned professional goals".to_string());
    }

    if let Some(source) = signals.source {
        triggers.push(format!("active on {source}"));
    }

    triggers.truncate(config.max_triggers);
    triggers
}

/// One sentence listing why the profile was recommended.
pub fn why(thresholds: &Thresholds, signals: &Signals<'_>) -> String {
    let mut reasons = Vec::with_capacity(5);

    if !signals.matched_skills.is_empty() {
        reasons.push(format!(
            "shared expertise in {}",
            signals.matched_skills.join(", ")
        ));
    }

    reasons.push(format!("their role as a {}", signals.role));

    let timing = signals.timing_score;
    reasons.push(
        if timing >= thresholds.active_timing {
            "very high recent professional activity"
        } else if timing >= thresholds.recent_timing {
            "high recent professional activity"
        } else if timing >= thresholds.moderate_timing {
            "moderate recent professional activity"
        } else {
            "relevant background with lower recent activity"
        }
        .to_string(),
    );

    if let Some(source) = signals.source {
        reasons.push(format!("public data from {source}"));
    }

    let opportunity = signals.opportunity_score;
    reasons.push(
        if opportunity >= thresholds.strong_match {
            "a strong overall match at this time"
        } else if opportunity >= thresholds.good_match {
            "good alignment with your current intent"
        } else {
            "a potential match worth exploring"
        }
        .to_string(),
    );

    format!("{WHY_LEAD_IN}{}.", reasons.join(", "))
}

/// Templated outreach line. `name` and `role` are interpolated verbatim.
pub fn starter(name: &str, role: &str) -> String {
    format!("Hi {name}, I came across your work as a {role} and thought it would be great to connect.")
}
