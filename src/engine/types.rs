//! Input profile records and the recommendations produced for them.
//!
//! Profile records arrive from heterogeneous suppliers, so deserialization is
//! lenient: a field of the wrong JSON type is read as absent instead of
//! failing the whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Skills as supplied by a profile source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Skills {
    /// Absent, or a shape that can't hold skills.
    #[default]
    Missing,
    /// Comma-separated skills, e.g. `"Rust, Go"`.
    Text(String),
    /// Already-split skills.
    List(Vec<String>),
}

impl Skills {
    pub fn is_missing(&self) -> bool {
        matches!(self, Skills::Missing)
    }

    /// Skills as they appear in the similarity text, without normalization.
    pub fn raw_text(&self) -> String {
        match self {
            Skills::Missing => String::new(),
            Skills::Text(raw) => raw.clone(),
            Skills::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for Skills {
    fn from(value: &str) -> Self {
        Skills::Text(value.to_string())
    }
}

impl From<Vec<String>> for Skills {
    fn from(value: Vec<String>) -> Self {
        Skills::List(value)
    }
}

impl<'de> Deserialize<'de> for Skills {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(raw) => Skills::Text(raw),
            Value::Array(items) => Skills::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => {
                if !other.is_null() {
                    log::debug!("ignoring malformed skills field: {other}");
                }
                Skills::Missing
            }
        })
    }
}

/// A professional profile handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Skills::is_missing")]
    pub skills: Skills,

    #[serde(default, deserialize_with = "lenient_string")]
    pub industry: Option<String>,

    /// Recency/activity proxy in `[0, 100]`.
    #[serde(default, deserialize_with = "lenient_number")]
    pub recent_activity_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,

    /// Older suppliers tag the origin under this key instead of `source`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_source: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub profile_url: Option<String>,
}

/// Role used when a profile doesn't state one.
pub const DEFAULT_ROLE: &str = "professional";

impl ProfileRecord {
    /// The stated role, or [`DEFAULT_ROLE`] when absent or blank.
    pub fn role_or_default(&self) -> &str {
        self.role
            .as_deref()
            .filter(|role| !role.trim().is_empty())
            .unwrap_or(DEFAULT_ROLE)
    }

    /// Origin tag from `source`, falling back to `profile_source`.
    /// Blank tags count as absent.
    pub fn source_tag(&self) -> Option<&str> {
        let present = |source: &&str| !source.trim().is_empty();
        self.source
            .as_deref()
            .filter(present)
            .or(self.profile_source.as_deref().filter(present))
    }

    /// Text compared against the intent: role, raw skills and industry
    /// joined by single spaces, missing fields rendered empty.
    pub fn similarity_text(&self) -> String {
        format!(
            "{} {} {}",
            self.role.as_deref().unwrap_or_default(),
            self.skills.raw_text(),
            self.industry.as_deref().unwrap_or_default()
        )
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

/// A ranked, explained candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: Option<String>,
    pub role: String,
    pub opportunity_score: f64,
    pub relevance_score: f64,
    pub timing_score: f64,
    pub matched_skills: Vec<String>,
    pub why: String,
    pub why_now: String,
    pub contextual_triggers: Vec<String>,
    pub starter: String,
    pub profile_url: String,
    pub source: Option<String>,
}

/// Ranked recommendations together with the sources the profiles came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub data_sources: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_string_and_list() {
        let p: ProfileRecord = serde_json::from_str(r#"{"skills": "Rust, Go"}"#).unwrap();
        assert_eq!(p.skills, Skills::Text("Rust, Go".to_string()));

        let p: ProfileRecord = serde_json::from_str(r#"{"skills": ["Rust", 3, "Go"]}"#).unwrap();
        assert_eq!(
            p.skills,
            Skills::List(vec!["Rust".to_string(), "Go".to_string()])
        );
    }

    #[test]
    fn test_malformed_fields_are_neutral() {
        let p: ProfileRecord = serde_json::from_str(
            r#"{"name": "Ana", "skills": {"a": 1}, "role": ["x"], "recent_activity_score": "soon"}"#,
        )
        .unwrap();
        assert_eq!(p.name.as_deref(), Some("Ana"));
        assert!(p.skills.is_missing());
        assert_eq!(p.role, None);
        assert_eq!(p.recent_activity_score, None);
    }

    #[test]
    fn test_numeric_string_activity_score() {
        let p: ProfileRecord =
            serde_json::from_str(r#"{"recent_activity_score": " 72.5 "}"#).unwrap();
        assert_eq!(p.recent_activity_score, Some(72.5));
    }

    #[test]
    fn test_role_defaults() {
        let mut p = ProfileRecord::default();
        assert_eq!(p.role_or_default(), "professional");
        p.role = Some("  ".to_string());
        assert_eq!(p.role_or_default(), "professional");
        p.role = Some("Engineer".to_string());
        assert_eq!(p.role_or_default(), "Engineer");
    }

    #[test]
    fn test_source_tag_prefers_source() {
        let p: ProfileRecord =
            serde_json::from_str(r#"{"source": "github", "profile_source": "devpost"}"#).unwrap();
        assert_eq!(p.source_tag(), Some("github"));

        let p: ProfileRecord = serde_json::from_str(r#"{"profile_source": "devpost"}"#).unwrap();
        assert_eq!(p.source_tag(), Some("devpost"));

        let p: ProfileRecord = serde_json::from_str(r#"{"source": ""}"#).unwrap();
        assert_eq!(p.source_tag(), None);
    }

    #[test]
    fn test_blank_source_falls_back_to_profile_source() {
        let p: ProfileRecord =
            serde_json::from_str(r#"{"source": " ", "profile_source": "devpost"}"#).unwrap();
        assert_eq!(p.source_tag(), Some("devpost"));
    }

    #[test]
    fn test_similarity_text_renders_missing_as_empty() {
        let p = ProfileRecord {
            skills: Skills::from("Rust, Go"),
            industry: Some("Technology".to_string()),
            ..Default::default()
        };
        assert_eq!(p.similarity_text(), " Rust, Go Technology");
        assert_eq!(ProfileRecord::default().similarity_text(), "  ");
    }

    #[test]
    fn test_similarity_text_joins_skill_list() {
        let p = ProfileRecord {
            role: Some("Researcher".to_string()),
            skills: Skills::from(vec!["NLP".to_string(), "Vision".to_string()]),
            ..Default::default()
        };
        assert_eq!(p.similarity_text(), "Researcher NLP, Vision ");
    }
}
