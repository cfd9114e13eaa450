//! Intent-to-profile matching.
//!
//! Ranks professional profiles against a free-text intent by combining
//! embedding similarity, recent activity and source trust, and explains each
//! ranking in plain sentences.
//!
//! ```no_run
//! use std::sync::Arc;
//! use connectiq::config::Config;
//! use connectiq::engine::RecommendationEngine;
//! use connectiq::profiles::{mock_profiles, ProfileLoader};
//! use connectiq::semantic::SemanticOracle;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let oracle = Arc::new(SemanticOracle::new(
//!     config.semantic.clone(),
//!     config.base_path().to_path_buf(),
//! ));
//! let engine = RecommendationEngine::new(oracle, config.scoring.clone());
//!
//! let loaded = ProfileLoader::new(mock_profiles()?).load("rust backend engineer");
//! let report = engine.report("rust backend engineer", &loaded.profiles, loaded.sources)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod profiles;
pub mod semantic;
pub mod storage;

#[cfg(test)]
mod tests;
