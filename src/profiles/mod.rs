//! Profile suppliers and the loader that pools their output.
//!
//! Each supplier is queried best-effort: a failing or empty supplier is
//! logged and skipped. When no supplier produced anything the loader falls
//! back to a fixed profile set tagged `"mock"`, so the engine always gets a
//! pool to rank.

mod fallback;
mod file;

use crate::engine::ProfileRecord;

pub use fallback::{load_mock_profiles, mock_profiles, MOCK_SOURCE};
pub use file::JsonFileSupplier;

#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed profile data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("supplier unavailable: {0}")]
    Unavailable(String),
}

/// A source of profile records, e.g. a code host or an academic index.
pub trait ProfileSupplier: Send + Sync {
    /// Source tag applied to profiles that don't carry their own.
    fn name(&self) -> &str;

    /// Profiles relevant to `intent`, at most `limit` when given.
    fn fetch(&self, intent: &str, limit: Option<usize>) -> Result<Vec<ProfileRecord>, SupplierError>;
}

/// Profiles pooled from all suppliers, plus the names of the suppliers that
/// contributed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedProfiles {
    pub profiles: Vec<ProfileRecord>,
    pub sources: Vec<String>,
}

pub struct ProfileLoader {
    suppliers: Vec<Box<dyn ProfileSupplier>>,
    fallback: Vec<ProfileRecord>,
    limit: Option<usize>,
}

impl ProfileLoader {
    /// A loader with no suppliers that falls back to `fallback`.
    pub fn new(fallback: Vec<ProfileRecord>) -> Self {
        Self {
            suppliers: Vec::new(),
            fallback,
            limit: None,
        }
    }

    pub fn with_supplier(mut self, supplier: impl ProfileSupplier + 'static) -> Self {
        self.suppliers.push(Box::new(supplier));
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Query every supplier in registration order and pool the results.
    pub fn load(&self, intent: &str) -> LoadedProfiles {
        let mut loaded = LoadedProfiles::default();

        for supplier in &self.suppliers {
            let name = supplier.name();
            match supplier.fetch(intent, self.limit) {
                Ok(profiles) if profiles.is_empty() => {
                    log::info!("supplier={name} outcome=empty");
                }
                Ok(profiles) => {
                    log::info!("supplier={name} outcome=success profiles={}", profiles.len());
                    loaded
                        .profiles
                        .extend(profiles.into_iter().map(|p| tag_source(p, name)));
                    loaded.sources.push(name.to_string());
                }
                Err(e) => {
                    log::warn!("supplier={name} outcome=error err={e}");
                }
            }
        }

        if loaded.profiles.is_empty() {
            log::info!("no supplier returned profiles, using fallback set");
            return LoadedProfiles {
                profiles: self
                    .fallback
                    .iter()
                    .cloned()
                    .map(|mut p| {
                        p.source = Some(MOCK_SOURCE.to_string());
                        p.profile_source = None;
                        p
                    })
                    .collect(),
                sources: vec![MOCK_SOURCE.to_string()],
            };
        }

        loaded
    }
}

fn tag_source(mut profile: ProfileRecord, source: &str) -> ProfileRecord {
    if profile.source_tag().is_none() {
        profile.source = Some(source.to_string());
    }
    profile
}
