use std::path::Path;

use crate::engine::ProfileRecord;
use crate::profiles::SupplierError;

/// Source tag of the fallback profile set.
pub const MOCK_SOURCE: &str = "mock";

const BUILTIN_MOCK_PROFILES: &str = include_str!("mock_profiles.json");

/// The built-in fallback profiles.
pub fn mock_profiles() -> Result<Vec<ProfileRecord>, SupplierError> {
    Ok(serde_json::from_str(BUILTIN_MOCK_PROFILES)?)
}

/// Fallback profiles from `path`, or the built-in set when no path is given.
pub fn load_mock_profiles(path: Option<&Path>) -> Result<Vec<ProfileRecord>, SupplierError> {
    match path {
        Some(path) => {
            log::debug!("loading fallback profiles from {}", path.display());
            let data = std::fs::read(path)?;
            Ok(serde_json::from_slice(&data)?)
        }
        None => mock_profiles(),
    }
}
