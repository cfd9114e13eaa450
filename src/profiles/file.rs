use std::path::PathBuf;

use crate::engine::ProfileRecord;
use crate::profiles::{ProfileSupplier, SupplierError};

/// Source tag for profiles read from a file without their own tag.
const DEFAULT_FILE_SOURCE: &str = "file";

/// Reads a JSON array of profile records from disk.
///
/// The file is re-read on every fetch; the intent is ignored.
pub struct JsonFileSupplier {
    path: PathBuf,
    name: String,
}

impl JsonFileSupplier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: DEFAULT_FILE_SOURCE.to_string(),
        }
    }

    /// Tag untagged profiles with `name` instead of `"file"`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl ProfileSupplier for JsonFileSupplier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, _intent: &str, limit: Option<usize>) -> Result<Vec<ProfileRecord>, SupplierError> {
        let data = std::fs::read(&self.path)?;
        let mut profiles: Vec<ProfileRecord> = serde_json::from_slice(&data)?;

        if let Some(limit) = limit {
            profiles.truncate(limit);
        }

        Ok(profiles)
    }
}
