use std::path::Path;

use crate::cli::errors::{CliError, CliResult};

/// Longest intent accepted from the command line (characters)
const MAX_INTENT_LENGTH: usize = 1000;

/// Validates the free-text intent
pub fn validate_intent(intent: &str) -> CliResult<()> {
    if intent.trim().is_empty() {
        return Err(CliError::validation("intent", "Intent cannot be empty"));
    }

    if intent.chars().count() > MAX_INTENT_LENGTH {
        return Err(CliError::validation(
            "intent",
            format!("Intent cannot exceed {MAX_INTENT_LENGTH} characters"),
        ));
    }

    Ok(())
}

/// Validates the profiles file path
pub fn validate_profiles_path(path: &Path) -> CliResult<()> {
    if !path.is_file() {
        return Err(CliError::validation(
            "profiles",
            format!("{} is not a file", path.display()),
        ));
    }
    Ok(())
}
