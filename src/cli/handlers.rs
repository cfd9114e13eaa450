use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;

use connectiq::config::Config;
use connectiq::engine::RecommendationEngine;
use connectiq::profiles::{load_mock_profiles, JsonFileSupplier, LoadedProfiles, ProfileLoader};
use connectiq::semantic::SemanticOracle;

use crate::cli::validation::{validate_intent, validate_profiles_path};

fn load_profiles(
    config: &Config,
    intent: &str,
    profiles: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<LoadedProfiles> {
    let fallback = load_mock_profiles(config.profiles.mock_profiles_path.as_deref())
        .context("failed to load fallback profiles")?;

    let mut loader = ProfileLoader::new(fallback).with_limit(limit.or(config.profiles.limit));

    if let Some(path) = profiles {
        validate_profiles_path(&path)?;
        loader = loader.with_supplier(JsonFileSupplier::new(path));
    }

    Ok(loader.load(intent))
}

pub fn handle_recommend(
    config: &Config,
    intent: String,
    profiles: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    validate_intent(&intent)?;

    let _span = tracing::info_span!("recommend", intent = %intent).entered();

    let loaded = load_profiles(config, &intent, profiles, limit)?;

    let oracle = Arc::new(SemanticOracle::new(
        config.semantic.clone(),
        config.base_path().to_path_buf(),
    ));
    let engine = RecommendationEngine::new(oracle, config.scoring.clone());

    let report = engine
        .report(&intent, &loaded.profiles, loaded.sources)
        .context("failed to rank profiles")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn handle_profiles(config: &Config, profiles: Option<PathBuf>, limit: Option<usize>) -> Result<()> {
    let loaded = load_profiles(config, "", profiles, limit)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "data_sources": loaded.sources,
            "profiles": loaded.profiles,
        }))?
    );
    Ok(())
}

pub fn handle_config(config: &Config) -> Result<()> {
    println!("# {}", config.base_path().join("config.yaml").display());
    print!("{}", serde_yml::to_string(config)?);
    Ok(())
}
