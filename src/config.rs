use std::collections::BTreeMap;
use std::path::PathBuf;

use homedir::my_home;
use serde::{Deserialize, Serialize};

use crate::storage::{BackendLocal, StorageManager};

const CONFIG_FILE: &str = "config.yaml";

/// Environment variable overriding the base directory.
pub const BASE_PATH_ENV: &str = "CONNECTIQ_BASE_PATH";

/// Default embedding model, the one the recommendations were tuned against.
const DEFAULT_SEMANTIC_MODEL: &str = "all-MiniLM-L6-v2";

const DEFAULT_RELEVANCE_WEIGHT: f64 = 0.7;
const DEFAULT_TIMING_WEIGHT: f64 = 0.3;
const DEFAULT_MAX_SCORE: f64 = 100.0;
const DEFAULT_TIMING_SCORE: f64 = 0.0;
const DEFAULT_UNKNOWN_SOURCE_TRUST: f64 = 1.0;
const DEFAULT_MAX_TRIGGERS: usize = 2;
const DEFAULT_PROFILE_LIMIT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid utf8")]
    NotUtf8,

    #[error("config is malformed: {0}")]
    Malformed(#[from] serde_yml::Error),

    #[error("invalid config: {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Score thresholds for the why-now badge and the explanation clauses.
///
/// All comparisons are inclusive on the lower bound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Timing needed for the "actively relevant" badge and the
    /// "very high activity" clause.
    #[serde(default = "default_active_timing")]
    pub active_timing: f64,

    /// Opportunity score also needed for the "actively relevant" badge.
    #[serde(default = "default_active_opportunity")]
    pub active_opportunity: f64,

    #[serde(default = "default_recent_timing")]
    pub recent_timing: f64,

    #[serde(default = "default_moderate_timing")]
    pub moderate_timing: f64,

    #[serde(default = "default_strong_match")]
    pub strong_match: f64,

    #[serde(default = "default_good_match")]
    pub good_match: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            active_timing: default_active_timing(),
            active_opportunity: default_active_opportunity(),
            recent_timing: default_recent_timing(),
            moderate_timing: default_moderate_timing(),
            strong_match: default_strong_match(),
            good_match: default_good_match(),
        }
    }
}

fn default_active_timing() -> f64 {
    85.0
}

fn default_active_opportunity() -> f64 {
    60.0
}

fn default_recent_timing() -> f64 {
    70.0
}

fn default_moderate_timing() -> f64 {
    50.0
}

fn default_strong_match() -> f64 {
    75.0
}

fn default_good_match() -> f64 {
    55.0
}

/// Weights, trust table and thresholds used by the recommendation engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the semantic relevance score
    #[serde(default = "default_relevance_weight")]
    pub relevance_weight: f64,

    /// Weight of the recency/activity score
    #[serde(default = "default_timing_weight")]
    pub timing_weight: f64,

    /// Upper clamp of the opportunity score. There is no lower clamp.
    #[serde(default = "default_max_score")]
    pub max_score: f64,

    /// Timing score for profiles without `recent_activity_score`
    #[serde(default = "default_timing_score")]
    pub default_timing_score: f64,

    /// Trust multiplier keyed by lowercase source name
    #[serde(default = "default_trust")]
    pub trust: BTreeMap<String, f64>,

    /// Trust multiplier for sources missing from `trust`
    #[serde(default = "default_unknown_source_trust")]
    pub unknown_source_trust: f64,

    #[serde(default)]
    pub thresholds: Thresholds,

    /// Maximum number of contextual triggers per recommendation
    #[serde(default = "default_max_triggers")]
    pub max_triggers: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            relevance_weight: default_relevance_weight(),
            timing_weight: default_timing_weight(),
            max_score: default_max_score(),
            default_timing_score: default_timing_score(),
            trust: default_trust(),
            unknown_source_trust: default_unknown_source_trust(),
            thresholds: Thresholds::default(),
            max_triggers: default_max_triggers(),
        }
    }
}

impl ScoringConfig {
    /// Trust multiplier for `source`, case-insensitive.
    pub fn trust_multiplier(&self, source: Option<&str>) -> f64 {
        source
            .map(|s| s.trim().to_lowercase())
            .and_then(|s| self.trust.get(&s).copied())
            .unwrap_or(self.unknown_source_trust)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("scoring.relevance_weight", self.relevance_weight),
            ("scoring.timing_weight", self.timing_weight),
            ("scoring.unknown_source_trust", self.unknown_source_trust),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be a non-negative number, got {value}"),
                ));
            }
        }

        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(ConfigError::invalid(
                "scoring.max_score",
                format!("must be greater than 0, got {}", self.max_score),
            ));
        }

        if !(0.0..=100.0).contains(&self.default_timing_score) {
            return Err(ConfigError::invalid(
                "scoring.default_timing_score",
                format!("must be between 0 and 100, got {}", self.default_timing_score),
            ));
        }

        if let Some((source, trust)) = self
            .trust
            .iter()
            .find(|(_, trust)| !trust.is_finite() || **trust < 0.0)
        {
            return Err(ConfigError::invalid(
                format!("scoring.trust.{source}"),
                format!("must be a non-negative number, got {trust}"),
            ));
        }

        // keys are matched against lowercased source tags
        self.trust = std::mem::take(&mut self.trust)
            .into_iter()
            .map(|(source, trust)| (source.trim().to_lowercase(), trust))
            .collect();

        Ok(())
    }
}

fn default_relevance_weight() -> f64 {
    DEFAULT_RELEVANCE_WEIGHT
}

fn default_timing_weight() -> f64 {
    DEFAULT_TIMING_WEIGHT
}

fn default_max_score() -> f64 {
    DEFAULT_MAX_SCORE
}

fn default_timing_score() -> f64 {
    DEFAULT_TIMING_SCORE
}

fn default_unknown_source_trust() -> f64 {
    DEFAULT_UNKNOWN_SOURCE_TRUST
}

fn default_max_triggers() -> usize {
    DEFAULT_MAX_TRIGGERS
}

fn default_trust() -> BTreeMap<String, f64> {
    [
        ("github", 1.0),
        ("devpost", 0.9),
        ("research", 1.15),
        ("orcid", 1.2),
        ("mock", 0.7),
    ]
    .into_iter()
    .map(|(source, trust)| (source.to_string(), trust))
    .collect()
}

/// Configuration for the embedding model behind the similarity oracle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// Model name for embeddings (e.g., "all-MiniLM-L6-v2")
    #[serde(default = "default_semantic_model")]
    pub model: String,

    /// Show a progress bar while the model downloads on first use
    #[serde(default)]
    pub show_download_progress: bool,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_SEMANTIC_MODEL.to_string(),
            show_download_progress: false,
        }
    }
}

fn default_semantic_model() -> String {
    DEFAULT_SEMANTIC_MODEL.to_string()
}

/// Where profiles come from when the CLI assembles a pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Maximum profiles taken from each supplier. `null` means no limit.
    #[serde(default = "default_profile_limit")]
    pub limit: Option<usize>,

    /// JSON file replacing the built-in fallback profiles
    #[serde(default)]
    pub mock_profiles_path: Option<PathBuf>,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            limit: default_profile_limit(),
            mock_profiles_path: None,
        }
    }
}

fn default_profile_limit() -> Option<usize> {
    Some(DEFAULT_PROFILE_LIMIT)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
    #[serde(default)]
    pub profiles: ProfilesConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Config {
    fn validate(&mut self) -> Result<(), ConfigError> {
        self.scoring.validate()?;

        if crate::semantic::EmbeddingModel::supports(&self.semantic.model).is_none() {
            return Err(ConfigError::invalid(
                "semantic.model",
                format!("unknown model '{}'", self.semantic.model),
            ));
        }

        if self.profiles.limit == Some(0) {
            return Err(ConfigError::invalid(
                "profiles.limit",
                "must be a positive integer",
            ));
        }

        Ok(())
    }

    /// Resolve the base directory from `CONNECTIQ_BASE_PATH`, falling back
    /// to `~/.local/share/connectiq`.
    pub fn base_path_from_env() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(BASE_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = my_home()
            .map_err(|_| ConfigError::NoHomeDir)?
            .ok_or(ConfigError::NoHomeDir)?;

        Ok(home.join(".local").join("share").join("connectiq"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Self::base_path_from_env()?)
    }

    /// Load `config.yaml` from `base_path`, creating it with defaults when
    /// missing and re-saving it when defaults were filled in.
    pub fn load_with(base_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_path = base_path.into();
        let store = BackendLocal::new(&base_path)?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            log::info!("creating default config at {}", base_path.display());
            store.write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())?;
        }

        let config_str = String::from_utf8(store.read(CONFIG_FILE)?).map_err(|_| ConfigError::NotUtf8)?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path;

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            log::debug!("upgrading config file with new defaults");
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let store = BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }

    pub fn base_path(&self) -> &std::path::Path {
        &self.base_path
    }
}
